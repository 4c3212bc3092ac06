//! The thumbnail composition pipeline.
//!
//! Each step takes the canvas explicitly and paints into it; the steps run in
//! a fixed order because later ones draw over earlier ones.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use fontdue::Font;
use image::Rgb;
use image::codecs::jpeg::JpegEncoder;

use crate::config::LayoutConfig;
use crate::error::{Result, ThumbnailError};
use crate::graphics::text::GlyphBox;
use crate::graphics::{Canvas, SourceImage, TextRenderer, TextStyle, filters};
use crate::layout;

const CANVAS_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

pub struct Composer<'a> {
    layout: &'a LayoutConfig,
    font: &'a Font,
}

impl<'a> Composer<'a> {
    pub fn new(layout: &'a LayoutConfig, font: &'a Font) -> Self {
        Self { layout, font }
    }

    /// Build the full thumbnail.
    ///
    /// `tag_icons` are drawn right-to-left: the first tag ends up rightmost.
    pub fn compose(
        &self,
        background: &SourceImage,
        title: &str,
        tag_icons: &[SourceImage],
        author_icon: &SourceImage,
    ) -> Canvas {
        let mut canvas = self.blank_canvas();
        let processed = prepare_background(background, self.layout);
        draw_background(&mut canvas, &processed, self.layout);
        self.draw_title(&mut canvas, title);
        draw_tag_badges(&mut canvas, tag_icons, self.layout);
        draw_author_badge(&mut canvas, author_icon, self.layout);
        canvas
    }

    pub fn blank_canvas(&self) -> Canvas {
        Canvas::new(self.layout.canvas_width, self.layout.canvas_height, CANVAS_COLOR)
    }

    /// Title lines, left-aligned at the anchor and wrapped to the inset width.
    pub fn draw_title(&self, canvas: &mut Canvas, title: &str) -> Vec<GlyphBox> {
        let anchor = layout::title_anchor(
            self.layout.canvas_height,
            self.layout.title_anchor_ratio,
            self.layout.border_padding,
        );
        let style = TextStyle::title(self.layout.font_size, self.layout.stroke_width);
        TextRenderer::new(self.font).draw(
            canvas,
            title,
            anchor,
            self.layout.title_wrap_width(),
            &style,
        )
    }
}

/// Cover-fit, desaturate and vignette the background.
pub fn prepare_background(background: &SourceImage, layout: &LayoutConfig) -> SourceImage {
    let filter = layout.resample.filter();
    let mut scaled = background.cover_fit(layout.canvas_width, layout.canvas_height, filter);
    log::debug!(
        "Background {}x{} scaled to {}x{}",
        background.width(),
        background.height(),
        scaled.width(),
        scaled.height()
    );

    filters::grayscale(scaled.pixels_mut(), layout.grayscale);
    let (rx, ry) = layout.vignette_radius;
    filters::vignette(
        scaled.pixels_mut(),
        layout.canvas_width as f32 * rx,
        layout.canvas_height as f32 * ry,
    );
    scaled
}

/// Blend the prepared background at the origin with the configured opacity.
pub fn draw_background(canvas: &mut Canvas, background: &SourceImage, layout: &LayoutConfig) {
    canvas.draw_image(background, 0, 0, layout.opacity);
}

/// Resize each tag icon to the badge height and lay them out from the right border.
///
/// Returns the top-left corner of every badge, in the order given.
pub fn draw_tag_badges(
    canvas: &mut Canvas,
    tag_icons: &[SourceImage],
    layout: &LayoutConfig,
) -> Vec<(i64, i64)> {
    let filter = layout.resample.filter();
    let badges: Vec<SourceImage> = tag_icons
        .iter()
        .map(|icon| icon.fit_height(layout.tag_badge_height, filter))
        .collect();
    let widths: Vec<u32> = badges.iter().map(SourceImage::width).collect();
    let positions = layout::tag_badge_positions(
        &widths,
        layout.canvas_width,
        layout.border_padding,
        layout.tag_badge_margin,
    );

    for (badge, &(x, y)) in badges.iter().zip(&positions) {
        canvas.draw_image(badge, x, y, 1.0);
    }
    positions
}

/// Author badge at its fixed corner.
pub fn draw_author_badge(canvas: &mut Canvas, author_icon: &SourceImage, layout: &LayoutConfig) {
    let badge = author_icon.fit_height(layout.author_badge_height, layout.resample.filter());
    let (x, y) = layout.author_badge_position;
    canvas.draw_image(&badge, x, y, 1.0);
}

/// Encode the canvas as JPEG at `path`, replacing any existing file.
///
/// The image is written to a sibling temp file and renamed into place, so a
/// failed run never leaves a truncated thumbnail behind.
pub fn encode_jpeg(canvas: Canvas, path: &Path, quality: u8) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| ThumbnailError::encoding(path, "output path has no file name"))?;
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    let written = write_jpeg(canvas, &tmp_path, quality).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|e| ThumbnailError::encoding(path, e))
    });
    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

fn write_jpeg(canvas: Canvas, path: &Path, quality: u8) -> Result<()> {
    let file = File::create(path).map_err(|e| ThumbnailError::encoding(path, e))?;
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, quality)
        .encode_image(&canvas.into_rgb())
        .map_err(|e| ThumbnailError::encoding(path, e))?;
    writer.flush().map_err(|e| ThumbnailError::encoding(path, e))?;
    Ok(())
}
