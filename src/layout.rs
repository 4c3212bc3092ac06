//! Placement arithmetic for the thumbnail.
//!
//! Everything here is pure: sizes in, sizes and offsets out. The composer
//! feeds the results to the raster primitives in [`crate::graphics`].

/// Scale factor that makes a `bw`×`bh` image cover a `canvas_w`×`canvas_h` canvas.
///
/// Fills the width unless that leaves the height short, in which case it
/// fills the height. The result is the smallest scale that covers both axes.
pub fn cover_fit_scale(bw: u32, bh: u32, canvas_w: u32, canvas_h: u32) -> f32 {
    let width_scale = canvas_w as f32 / bw as f32;
    let height_scale = canvas_h as f32 / bh as f32;
    if bh as f32 * width_scale > canvas_h as f32 {
        width_scale
    } else {
        height_scale
    }
}

/// Pixel size of the background after cover-fit scaling.
pub fn cover_fit_size(bw: u32, bh: u32, canvas_w: u32, canvas_h: u32) -> (u32, u32) {
    let scale = cover_fit_scale(bw, bh, canvas_w, canvas_h);
    (scaled(bw, scale), scaled(bh, scale))
}

/// Aspect-preserving size with the height pinned to `target_height`.
pub fn fit_height(w: u32, h: u32, target_height: u32) -> (u32, u32) {
    let scale = target_height as f32 / h as f32;
    (scaled(w, scale).max(1), target_height)
}

fn scaled(v: u32, scale: f32) -> u32 {
    (v as f32 * scale).round() as u32
}

/// Top-left corners for tag badges, laid out right-to-left from the right border.
///
/// The first width is placed flush against `canvas_w - padding`, each following
/// badge sits `margin` pixels to the left of the previous one.
pub fn tag_badge_positions(widths: &[u32], canvas_w: u32, padding: u32, margin: u32) -> Vec<(i64, i64)> {
    let mut right = canvas_w as i64 - padding as i64;
    let mut positions = Vec::with_capacity(widths.len());
    for &width in widths {
        right -= width as i64;
        positions.push((right, padding as i64));
        right -= margin as i64;
    }
    positions
}

/// Where the first line of the title starts.
pub fn title_anchor(canvas_h: u32, anchor_ratio: f32, padding: u32) -> (f32, f32) {
    (padding as f32, canvas_h as f32 * anchor_ratio)
}
