use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageReader, RgbaImage};

use crate::error::{Result, ThumbnailError};
use crate::layout;

/// A decoded raster loaded from disk (background, tag icon or author icon).
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Decode an image file. Any failure to open or decode is a missing asset.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = ImageReader::open(path)
            .map_err(|e| ThumbnailError::missing(path, e))?
            .with_guessed_format()
            .map_err(|e| ThumbnailError::missing(path, e))?;
        let decoded = reader.decode().map_err(|e| ThumbnailError::missing(path, e))?;
        log::debug!(
            "Loaded {} ({}x{})",
            path.display(),
            decoded.width(),
            decoded.height()
        );
        Ok(Self {
            pixels: decoded.to_rgba8(),
        })
    }

    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    /// A resized copy at exactly `width`×`height`.
    pub fn resize_exact(&self, width: u32, height: u32, filter: FilterType) -> Self {
        if (width, height) == (self.width(), self.height()) {
            return self.clone();
        }
        Self {
            pixels: imageops::resize(&self.pixels, width, height, filter),
        }
    }

    /// A copy scaled so its height is exactly `height`, keeping the aspect ratio.
    pub fn fit_height(&self, height: u32, filter: FilterType) -> Self {
        let (w, h) = layout::fit_height(self.width(), self.height(), height);
        self.resize_exact(w, h, filter)
    }

    /// A copy scaled to cover a `canvas_w`×`canvas_h` area.
    pub fn cover_fit(&self, canvas_w: u32, canvas_h: u32, filter: FilterType) -> Self {
        let (w, h) = layout::cover_fit_size(self.width(), self.height(), canvas_w, canvas_h);
        self.resize_exact(w, h, filter)
    }
}
