//! One thumbnail run, start to finish.

use std::path::PathBuf;
use std::time::Instant;

use crate::assets::Assets;
use crate::composer::{self, Composer};
use crate::config::ThumbnailConfig;
use crate::error::Result;
use crate::fonts::FontRegistry;

/// Install fonts, load the inputs, compose and write the thumbnail.
///
/// Returns the path of the written JPEG.
pub fn run(config: &ThumbnailConfig) -> Result<PathBuf> {
    config.validate()?;
    let started = Instant::now();

    let mut fonts = FontRegistry::new();
    let count = fonts.install_dir(&config.font_dir)?;
    log::debug!("{} font(s) installed from {}", count, config.font_dir.display());
    let font = fonts.family(&config.font_family)?;

    let assets = Assets::load(config)?;
    let canvas = Composer::new(&config.layout, font).compose(
        &assets.background,
        &config.title_text(),
        &assets.tags,
        &assets.author,
    );
    log::debug!("Composed in {:?}", started.elapsed());

    let output = config.output_path();
    composer::encode_jpeg(canvas, &output, config.layout.jpeg_quality)?;
    log::info!("Wrote {} in {:?}", output.display(), started.elapsed());
    Ok(output)
}
