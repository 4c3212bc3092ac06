//! Resolves and loads the images a thumbnail is built from.
//!
//! Tag and author icons live next to the background photo as `<id>.png`.

use std::path::{Path, PathBuf};

use crate::config::ThumbnailConfig;
use crate::error::Result;
use crate::graphics::SourceImage;

/// Every decoded input of one run.
pub struct Assets {
    pub background: SourceImage,
    /// Tag icons in the order the tags were given.
    pub tags: Vec<SourceImage>,
    pub author: SourceImage,
}

pub fn icon_path(asset_dir: &Path, id: &str) -> PathBuf {
    asset_dir.join(format!("{}.png", id))
}

impl Assets {
    /// Load the background, tag icons and author icon for `config`.
    ///
    /// Fails on the first image that cannot be read or decoded.
    pub fn load(config: &ThumbnailConfig) -> Result<Self> {
        let dir = config.asset_dir();
        let background = SourceImage::load(&config.background)?;
        let tags = config
            .tags
            .iter()
            .map(|tag| SourceImage::load(&icon_path(dir, tag)))
            .collect::<Result<Vec<_>>>()?;
        let author = SourceImage::load(&icon_path(dir, &config.author))?;

        log::info!(
            "Loaded background {}x{}, {} tag icon(s), author '{}'",
            background.width(),
            background.height(),
            tags.len(),
            config.author
        );
        Ok(Self {
            background,
            tags,
            author,
        })
    }
}
