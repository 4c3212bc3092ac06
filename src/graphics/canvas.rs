use image::{Rgb, RgbImage, Rgba, RgbaImage};

use super::SourceImage;

/// The output raster. Starts as a solid opaque color and is painted in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, color: Rgb<u8>) -> Self {
        let Rgb([r, g, b]) = color;
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255])),
        }
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

    /// Alpha-composite `src` with its top-left corner at `(x, y)`.
    ///
    /// Each source pixel's alpha is multiplied by `opacity`. Anything outside
    /// the canvas is clipped.
    pub fn draw_image(&mut self, src: &SourceImage, x: i64, y: i64, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        let (cw, ch) = (self.width() as i64, self.height() as i64);
        let src = src.pixels();

        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + src.width() as i64).min(cw);
        let y1 = (y + src.height() as i64).min(ch);

        for dy in y0..y1 {
            for dx in x0..x1 {
                let s = src.get_pixel((dx - x) as u32, (dy - y) as u32);
                let alpha = s[3] as f32 / 255.0 * opacity;
                self.blend_pixel(dx as u32, dy as u32, [s[0], s[1], s[2]], alpha);
            }
        }
    }

    /// Paint `color` over the canvas using a coverage mask the size of the canvas.
    pub fn fill_mask(&mut self, mask: &[f32], color: Rgb<u8>) {
        let width = self.width();
        for (i, &coverage) in mask.iter().enumerate() {
            if coverage <= 0.0 {
                continue;
            }
            let x = i as u32 % width;
            let y = i as u32 / width;
            if y >= self.height() {
                break;
            }
            self.blend_pixel(x, y, color.0, coverage.min(1.0));
        }
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 3], alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let dst = self.pixels.get_pixel_mut(x, y);
        for c in 0..3 {
            let blended = color[c] as f32 * alpha + dst[c] as f32 * (1.0 - alpha);
            dst[c] = blended.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = 255;
    }

    /// Flatten for encoding; the canvas is always opaque.
    pub fn into_rgb(self) -> RgbImage {
        image::DynamicImage::ImageRgba8(self.pixels).to_rgb8()
    }
}
