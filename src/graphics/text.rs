//! Title rendering on top of `fontdue`'s layout and rasterizer.
//!
//! Glyph coverage is accumulated into a canvas-sized mask first; the outline
//! is that mask dilated by the stroke width. Stroke is painted before fill so
//! the fill sits on top and the stroke only shows around the contours.

use fontdue::Font;
use fontdue::layout::{
    CoordinateSystem, Layout, LayoutSettings, TextStyle as LayoutText, WrapStyle,
};
use image::Rgb;

use super::Canvas;

/// `WhiteSmoke`.
pub const FILL_COLOR: Rgb<u8> = Rgb([245, 245, 245]);
pub const STROKE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Pixel size (points at 72 dpi).
    pub size: f32,
    pub fill: Rgb<u8>,
    pub stroke: Rgb<u8>,
    pub stroke_width: f32,
}

impl TextStyle {
    pub fn title(size: f32, stroke_width: f32) -> Self {
        Self {
            size,
            fill: FILL_COLOR,
            stroke: STROKE_COLOR,
            stroke_width,
        }
    }
}

/// Where one glyph bitmap lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphBox {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    pub ch: char,
}

impl GlyphBox {
    pub fn right(&self) -> i64 {
        self.x + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height as i64
    }
}

pub struct TextRenderer<'a> {
    font: &'a Font,
}

impl<'a> TextRenderer<'a> {
    pub fn new(font: &'a Font) -> Self {
        Self { font }
    }

    fn layout(&self, text: &str, anchor: (f32, f32), max_width: f32, size: f32) -> Layout {
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings {
            x: anchor.0,
            y: anchor.1,
            max_width: Some(max_width),
            wrap_style: WrapStyle::Word,
            wrap_hard_breaks: true,
            ..LayoutSettings::default()
        });
        layout.append(&[self.font], &LayoutText::new(text, size, 0));
        layout
    }

    /// Glyph boxes for `text`, wrapped to `max_width`, starting at `anchor`.
    pub fn measure(&self, text: &str, anchor: (f32, f32), max_width: f32, size: f32) -> Vec<GlyphBox> {
        self.layout(text, anchor, max_width, size)
            .glyphs()
            .iter()
            .filter(|g| g.width > 0 && g.height > 0 && !g.parent.is_whitespace())
            .map(|g| GlyphBox {
                x: g.x.round() as i64,
                y: g.y.round() as i64,
                width: g.width as u32,
                height: g.height as u32,
                ch: g.parent,
            })
            .collect()
    }

    /// Draw `text` onto the canvas and return the glyph boxes that were painted.
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        text: &str,
        anchor: (f32, f32),
        max_width: f32,
        style: &TextStyle,
    ) -> Vec<GlyphBox> {
        let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);
        let mut fill = vec![0.0f32; (cw * ch) as usize];

        let layout = self.layout(text, anchor, max_width, style.size);
        let mut boxes = Vec::new();
        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 || glyph.parent.is_whitespace() {
                continue;
            }
            let (metrics, bitmap) = self.font.rasterize_config(glyph.key);
            let gx = glyph.x.round() as i64;
            let gy = glyph.y.round() as i64;
            for row in 0..metrics.height {
                let y = gy + row as i64;
                if y < 0 || y >= ch {
                    continue;
                }
                for col in 0..metrics.width {
                    let x = gx + col as i64;
                    if x < 0 || x >= cw {
                        continue;
                    }
                    let coverage = bitmap[row * metrics.width + col] as f32 / 255.0;
                    let slot = &mut fill[(y * cw + x) as usize];
                    *slot = slot.max(coverage);
                }
            }
            boxes.push(GlyphBox {
                x: gx,
                y: gy,
                width: metrics.width as u32,
                height: metrics.height as u32,
                ch: glyph.parent,
            });
        }

        if style.stroke_width > 0.0 {
            let stroke = dilate(&fill, cw as usize, ch as usize, style.stroke_width);
            canvas.fill_mask(&stroke, style.stroke);
        }
        canvas.fill_mask(&fill, style.fill);

        log::debug!("Drew {} glyphs at ({:.0}, {:.0})", boxes.len(), anchor.0, anchor.1);
        boxes
    }
}

/// Grayscale dilation with a disc of the given radius.
fn dilate(mask: &[f32], width: usize, height: usize, radius: f32) -> Vec<f32> {
    let reach = radius.ceil() as i64;
    let offsets: Vec<(i64, i64)> = (-reach..=reach)
        .flat_map(|dy| (-reach..=reach).map(move |dx| (dx, dy)))
        .filter(|&(dx, dy)| ((dx * dx + dy * dy) as f32).sqrt() <= radius)
        .collect();

    let mut out = mask.to_vec();
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let mut best = mask[(y * width as i64 + x) as usize];
            for &(dx, dy) in &offsets {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                best = best.max(mask[(ny * width as i64 + nx) as usize]);
            }
            out[(y * width as i64 + x) as usize] = best;
        }
    }
    out
}
