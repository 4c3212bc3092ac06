use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use post_thumbnail::config::{ConfigFile, LayoutPreset, Overrides, Resample};
use post_thumbnail::{ThumbnailConfig, ThumbnailError};

/// Composite a social-media thumbnail for a blog post.
#[derive(Parser, Debug)]
#[command(name = "post-thumbnail", version, about)]
struct Cli {
    /// Background photo; the thumbnail is written next to it
    #[arg(short, long, value_name = "FILE")]
    background: Option<PathBuf>,

    /// Title line (repeat for more lines, or use \n inside one)
    #[arg(short, long = "title", value_name = "LINE")]
    title: Vec<String>,

    /// Tag identifier, resolved to <background dir>/<tag>.png
    #[arg(long = "tag", value_name = "ID")]
    tags: Vec<String>,

    /// Author identifier, resolved to <background dir>/<author>.png
    #[arg(short, long, value_name = "ID")]
    author: Option<String>,

    /// TOML file with thumbnail settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory searched recursively for .ttf/.otf files
    #[arg(long, value_name = "DIR")]
    fonts: Option<PathBuf>,

    #[arg(long, value_name = "NAME")]
    font_family: Option<String>,

    #[arg(long, value_name = "PT")]
    font_size: Option<f32>,

    /// Background desaturation in [0, 1]
    #[arg(long, value_name = "G")]
    grayscale: Option<f32>,

    /// Background opacity in [0, 1]
    #[arg(long, value_name = "O")]
    opacity: Option<f32>,

    /// Layout preset: standard or classic
    #[arg(long, value_parser = parse_preset)]
    preset: Option<LayoutPreset>,

    #[arg(long, value_name = "PX")]
    tag_badge_height: Option<u32>,

    #[arg(long, value_name = "PX")]
    tag_margin: Option<u32>,

    #[arg(long, value_name = "PX")]
    author_badge_height: Option<u32>,

    #[arg(long, value_name = "PX")]
    border_padding: Option<u32>,

    #[arg(long, value_name = "Q")]
    jpeg_quality: Option<u8>,

    /// Resize filter: nearest, triangle, catmull-rom, gaussian, lanczos3
    #[arg(long, value_parser = parse_resample)]
    resample: Option<Resample>,

    /// Write somewhere other than <background dir>/thumbnail.jpeg
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn parse_preset(s: &str) -> Result<LayoutPreset, String> {
    s.parse().map_err(|e: ThumbnailError| e.to_string())
}

fn parse_resample(s: &str) -> Result<Resample, String> {
    s.parse().map_err(|e: ThumbnailError| e.to_string())
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            background: self.background.clone(),
            title: (!self.title.is_empty()).then(|| self.title.clone()),
            tags: (!self.tags.is_empty()).then(|| self.tags.clone()),
            author: self.author.clone(),
            font_dir: self.fonts.clone(),
            font_family: self.font_family.clone(),
            output: self.output.clone(),
            preset: self.preset,
            font_size: self.font_size,
            grayscale: self.grayscale,
            opacity: self.opacity,
            tag_badge_height: self.tag_badge_height,
            tag_badge_margin: self.tag_margin,
            author_badge_height: self.author_badge_height,
            border_padding: self.border_padding,
            jpeg_quality: self.jpeg_quality,
            resample: self.resample,
        }
    }

    fn into_config(self) -> Result<ThumbnailConfig, ThumbnailError> {
        let mut layers = Vec::new();
        if let Some(path) = &self.config {
            let file = ConfigFile::load(path)?;
            log::info!("Loaded settings from {}", path.display());
            layers.push(file.overrides().clone());
        }
        layers.push(self.overrides());
        ThumbnailConfig::from_layers(&layers)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = cli
        .into_config()
        .and_then(|config| post_thumbnail::run(&config));

    match result {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
