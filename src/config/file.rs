//! Thumbnail configuration file parsing.
//!
//! A config file lets a blog keep its thumbnail settings next to its posts
//! instead of repeating them on the command line. Relative paths are resolved
//! against the directory the file lives in.
//!
//! # Example thumbnail.toml
//!
//! ```toml
//! [thumbnail]
//! background = "cover.jpg"
//! title = ["Reusable Build Components with", "Default Interface Implementations"]
//! tags = ["csharp", "nuke"]
//! author = "me"
//!
//! [fonts]
//! directory = "../fonts"
//! family = "Roboto Black"
//!
//! [layout]
//! preset = "standard"
//! grayscale = 0.8
//! opacity = 0.7
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{LayoutPreset, Overrides, Resample};
use crate::error::{Result, ThumbnailError};

/// [thumbnail] section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThumbnailSection {
    background: Option<PathBuf>,
    title: Option<TitleValue>,
    tags: Option<Vec<String>>,
    author: Option<String>,
    output: Option<PathBuf>,
}

/// A title may be written as one string or as a list of lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TitleValue {
    Single(String),
    Lines(Vec<String>),
}

/// [fonts] section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FontsSection {
    directory: Option<PathBuf>,
    family: Option<String>,
}

/// [layout] section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutSection {
    preset: Option<LayoutPreset>,
    font_size: Option<f32>,
    grayscale: Option<f32>,
    opacity: Option<f32>,
    tag_badge_height: Option<u32>,
    tag_badge_margin: Option<u32>,
    author_badge_height: Option<u32>,
    border_padding: Option<u32>,
    jpeg_quality: Option<u8>,
    resample: Option<Resample>,
}

/// Raw TOML structure.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThumbnailToml {
    #[serde(default)]
    thumbnail: ThumbnailSection,
    #[serde(default)]
    fonts: FontsSection,
    #[serde(default)]
    layout: LayoutSection,
}

/// Loaded configuration file with paths resolved.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    overrides: Overrides,
    /// Directory the file lives in.
    base_path: PathBuf,
}

impl ConfigFile {
    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ThumbnailError::missing(path, e))?;
        let base_path = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        Self::parse(&content, base_path)
    }

    /// Parse configuration text, resolving relative paths against `base_path`.
    pub fn parse(content: &str, base_path: PathBuf) -> Result<Self> {
        let toml: ThumbnailToml = toml::from_str(content)?;

        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base_path.join(p) };

        let overrides = Overrides {
            background: toml.thumbnail.background.map(resolve),
            title: toml.thumbnail.title.map(|t| match t {
                TitleValue::Single(line) => vec![line],
                TitleValue::Lines(lines) => lines,
            }),
            tags: toml.thumbnail.tags,
            author: toml.thumbnail.author,
            output: toml.thumbnail.output.map(resolve),
            font_dir: toml.fonts.directory.map(resolve),
            font_family: toml.fonts.family,
            preset: toml.layout.preset,
            font_size: toml.layout.font_size,
            grayscale: toml.layout.grayscale,
            opacity: toml.layout.opacity,
            tag_badge_height: toml.layout.tag_badge_height,
            tag_badge_margin: toml.layout.tag_badge_margin,
            author_badge_height: toml.layout.author_badge_height,
            border_padding: toml.layout.border_padding,
            jpeg_quality: toml.layout.jpeg_quality,
            resample: toml.layout.resample,
        };

        Ok(Self { overrides, base_path })
    }

    /// The layer this file contributes.
    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Get the directory the file was loaded from.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
