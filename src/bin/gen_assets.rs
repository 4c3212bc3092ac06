//! Sample asset generator: a background photo stand-in, two tag icons and an
//! author icon, enough to try the thumbnail tool without real images.
//! Run with: cargo run --bin gen_assets -- <dir>

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use image::{ImageResult, Rgba, RgbaImage};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample-post"));

    match generate(&dir) {
        Ok(()) => {
            log::info!("Assets generated in {}", dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to generate assets in {}: {}", dir.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn generate(dir: &Path) -> ImageResult<()> {
    std::fs::create_dir_all(dir)?;

    // Wider than the canvas so the cover fit has something to crop.
    generate_background(&dir.join("background.png"), 2400, 1000)?;

    generate_badge(&dir.join("rust.png"), 200, 200, Rgba([222, 165, 132, 255]))?;
    generate_badge(&dir.join("cli.png"), 320, 160, Rgba([66, 135, 245, 255]))?;
    generate_badge(&dir.join("me.png"), 256, 256, Rgba([74, 78, 105, 255]))?;
    Ok(())
}

fn generate_background(path: &Path, width: u32, height: u32) -> ImageResult<()> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width) as u8;
        let g = (y * 255 / height) as u8;
        let b = 255 - ((x + y) * 255 / (width + height)) as u8;
        Rgba([r, g, b, 255])
    });
    img.save(path)?;
    log::info!("Created {}", path.display());
    Ok(())
}

/// Filled ellipse on a transparent square, so alpha blending is visible.
fn generate_badge(path: &Path, width: u32, height: u32, fill: Rgba<u8>) -> ImageResult<()> {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let dx = (x as f32 + 0.5 - cx) / cx;
        let dy = (y as f32 + 0.5 - cy) / cy;
        if dx * dx + dy * dy <= 1.0 {
            fill
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    img.save(path)?;
    log::info!("Created {}", path.display());
    Ok(())
}
