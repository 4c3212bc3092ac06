//! Run configuration.
//!
//! A run is described by a [`ThumbnailConfig`], assembled once at the entry
//! point from layered [`Overrides`] (defaults < preset < config file < CLI)
//! and then passed by reference into the pipeline. Nothing mutates it after
//! [`ThumbnailConfig::validate`] succeeds.

mod file;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::imageops::FilterType;
use serde::Deserialize;

use crate::error::{Result, ThumbnailError};

pub use file::ConfigFile;

pub const CANVAS_WIDTH: u32 = 1200;
pub const CANVAS_HEIGHT: u32 = 675;
pub const OUTPUT_FILE_NAME: &str = "thumbnail.jpeg";
pub const DEFAULT_FONT_FAMILY: &str = "Roboto Black";
pub const DEFAULT_AUTHOR: &str = "me";

/// Named bundles of layout defaults.
///
/// `Standard` is the current look; `Classic` reproduces the earlier thumbnails
/// (larger tag badges, smaller author badge, title a little lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPreset {
    #[default]
    Standard,
    Classic,
}

impl FromStr for LayoutPreset {
    type Err = ThumbnailError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "classic" => Ok(Self::Classic),
            other => Err(ThumbnailError::invalid(format!(
                "unknown preset '{}' (expected standard or classic)",
                other
            ))),
        }
    }
}

impl fmt::Display for LayoutPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Classic => write!(f, "classic"),
        }
    }
}

/// Resampling filter used for every resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resample {
    Nearest,
    Triangle,
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl Resample {
    pub fn filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl FromStr for Resample {
    type Err = ThumbnailError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "triangle" | "bilinear" => Ok(Self::Triangle),
            "catmull-rom" | "bicubic" => Ok(Self::CatmullRom),
            "gaussian" => Ok(Self::Gaussian),
            "lanczos3" => Ok(Self::Lanczos3),
            other => Err(ThumbnailError::invalid(format!("unknown resample filter '{}'", other))),
        }
    }
}

/// Geometry and look of the thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Title size in points (rendered at 72 dpi, so points == pixels).
    pub font_size: f32,
    /// Background desaturation, 0 = untouched, 1 = fully gray.
    pub grayscale: f32,
    /// Background opacity over the black canvas.
    pub opacity: f32,
    pub tag_badge_height: u32,
    pub tag_badge_margin: u32,
    pub author_badge_height: u32,
    /// Fixed top-left corner of the author badge, independent of padding.
    pub author_badge_position: (i64, i64),
    pub border_padding: u32,
    /// Vertical start of the title as a fraction of the canvas height.
    pub title_anchor_ratio: f32,
    /// Horizontal inset on each side that bounds the title wrap width.
    pub title_wrap_inset: u32,
    /// Vignette radii as fractions of the canvas size.
    pub vignette_radius: (f32, f32),
    pub stroke_width: f32,
    pub resample: Resample,
    pub jpeg_quality: u8,
}

impl LayoutConfig {
    pub fn preset(preset: LayoutPreset) -> Self {
        let base = Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            font_size: 70.0,
            grayscale: 0.8,
            opacity: 0.7,
            tag_badge_height: 80,
            tag_badge_margin: 40,
            author_badge_height: 120,
            author_badge_position: (60, 60),
            border_padding: 60,
            title_anchor_ratio: 0.55,
            title_wrap_inset: 60,
            vignette_radius: (0.8, 0.7),
            stroke_width: 1.2,
            resample: Resample::default(),
            jpeg_quality: 75,
        };
        match preset {
            LayoutPreset::Standard => base,
            LayoutPreset::Classic => Self {
                tag_badge_height: 100,
                author_badge_height: 100,
                title_anchor_ratio: 0.60,
                title_wrap_inset: 40,
                ..base
            },
        }
    }

    /// Maximum line width handed to the text layout.
    pub fn title_wrap_width(&self) -> f32 {
        self.canvas_width.saturating_sub(2 * self.title_wrap_inset) as f32
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ThumbnailError::invalid("canvas size must be non-zero"));
        }
        unit_range("grayscale", self.grayscale)?;
        unit_range("opacity", self.opacity)?;
        unit_range("title anchor", self.title_anchor_ratio)?;
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ThumbnailError::invalid(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        if self.tag_badge_height == 0 || self.author_badge_height == 0 {
            return Err(ThumbnailError::invalid("badge heights must be positive"));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(ThumbnailError::invalid("stroke width must not be negative"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ThumbnailError::invalid(format!(
                "jpeg quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        if self.title_wrap_width() <= 0.0 {
            return Err(ThumbnailError::invalid("title wrap width leaves no room for text"));
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::preset(LayoutPreset::Standard)
    }
}

fn unit_range(name: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ThumbnailError::invalid(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}

/// Everything one run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailConfig {
    pub background: PathBuf,
    /// Title, one entry per explicit line.
    pub title: Vec<String>,
    pub tags: Vec<String>,
    pub author: String,
    pub font_dir: PathBuf,
    pub font_family: String,
    /// Overrides the default `<background dir>/thumbnail.jpeg`.
    pub output: Option<PathBuf>,
    pub layout: LayoutConfig,
}

impl ThumbnailConfig {
    pub fn new(background: impl Into<PathBuf>, title: Vec<String>) -> Self {
        Self {
            background: background.into(),
            title,
            tags: Vec::new(),
            author: DEFAULT_AUTHOR.to_string(),
            font_dir: PathBuf::from("fonts"),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            output: None,
            layout: LayoutConfig::default(),
        }
    }

    /// Folds the layers in order; later layers win.
    pub fn from_layers(layers: &[Overrides]) -> Result<Self> {
        let preset = layers.iter().rev().find_map(|l| l.preset).unwrap_or_default();

        let mut config = Self::new(PathBuf::new(), Vec::new());
        config.layout = LayoutConfig::preset(preset);
        for layer in layers {
            layer.apply(&mut config);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.background.as_os_str().is_empty() {
            return Err(ThumbnailError::invalid("background image path is required"));
        }
        if self.title.iter().all(|line| line.trim().is_empty()) {
            return Err(ThumbnailError::invalid("title is required"));
        }
        if self.author.trim().is_empty() {
            return Err(ThumbnailError::invalid("author identifier must not be empty"));
        }
        if let Some(tag) = self.tags.iter().find(|t| t.trim().is_empty()) {
            return Err(ThumbnailError::invalid(format!("empty tag identifier {:?}", tag)));
        }
        self.layout.validate()
    }

    /// Title joined with explicit line breaks, ready for layout.
    pub fn title_text(&self) -> String {
        self.title.join("\n")
    }

    /// Directory the background lives in; tag and author icons are looked up here.
    pub fn asset_dir(&self) -> &Path {
        self.background.parent().unwrap_or(Path::new("."))
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => self.asset_dir().join(OUTPUT_FILE_NAME),
        }
    }
}

/// One configuration layer. `None` leaves the value underneath untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub background: Option<PathBuf>,
    pub title: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
    pub font_dir: Option<PathBuf>,
    pub font_family: Option<String>,
    pub output: Option<PathBuf>,
    pub preset: Option<LayoutPreset>,
    pub font_size: Option<f32>,
    pub grayscale: Option<f32>,
    pub opacity: Option<f32>,
    pub tag_badge_height: Option<u32>,
    pub tag_badge_margin: Option<u32>,
    pub author_badge_height: Option<u32>,
    pub border_padding: Option<u32>,
    pub jpeg_quality: Option<u8>,
    pub resample: Option<Resample>,
}

impl Overrides {
    fn apply(&self, config: &mut ThumbnailConfig) {
        if let Some(v) = &self.background {
            config.background = v.clone();
        }
        if let Some(v) = &self.title {
            config.title = split_title_lines(v);
        }
        if let Some(v) = &self.tags {
            config.tags = v.clone();
        }
        if let Some(v) = &self.author {
            config.author = v.clone();
        }
        if let Some(v) = &self.font_dir {
            config.font_dir = v.clone();
        }
        if let Some(v) = &self.font_family {
            config.font_family = v.clone();
        }
        if let Some(v) = &self.output {
            config.output = Some(v.clone());
        }

        let layout = &mut config.layout;
        if let Some(v) = self.font_size {
            layout.font_size = v;
        }
        if let Some(v) = self.grayscale {
            layout.grayscale = v;
        }
        if let Some(v) = self.opacity {
            layout.opacity = v;
        }
        if let Some(v) = self.tag_badge_height {
            layout.tag_badge_height = v;
        }
        if let Some(v) = self.tag_badge_margin {
            layout.tag_badge_margin = v;
        }
        if let Some(v) = self.author_badge_height {
            layout.author_badge_height = v;
        }
        if let Some(v) = self.border_padding {
            // The standard look keeps the title inside the same border.
            if layout.title_wrap_inset == layout.border_padding {
                layout.title_wrap_inset = v;
            }
            layout.border_padding = v;
        }
        if let Some(v) = self.jpeg_quality {
            layout.jpeg_quality = v;
        }
        if let Some(v) = self.resample {
            layout.resample = v;
        }
    }
}

/// Splits each entry on real newlines and on a literal `\n` escape.
pub fn split_title_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| {
            line.replace("\\n", "\n")
                .split('\n')
                .map(|part| part.trim_end().to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}
