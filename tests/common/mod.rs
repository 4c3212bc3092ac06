use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

const CANDIDATE_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// A bold TTF to render with, from `THUMBNAIL_TEST_FONT` or a common system path.
pub fn test_font() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("THUMBNAIL_TEST_FONT") {
        return Some(PathBuf::from(path));
    }
    let found = CANDIDATE_FONTS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file());
    if found.is_none() {
        eprintln!("no test font found; set THUMBNAIL_TEST_FONT to run text tests");
    }
    found
}

pub fn write_png(path: &Path, w: u32, h: u32, px: [u8; 4]) {
    RgbaImage::from_pixel(w, h, Rgba(px)).save(path).unwrap();
}

/// A background with some structure so filters have something to act on.
pub fn write_background(path: &Path, w: u32, h: u32) {
    RgbaImage::from_fn(w, h, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    })
    .save(path)
    .unwrap();
}
