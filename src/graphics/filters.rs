//! Color filters applied to the background before compositing.

use image::RgbaImage;

/// BT.709 luma weights.
const LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Share of the maximum distance at which the vignette reaches full strength.
const VIGNETTE_FALLOFF: f32 = 0.9;

/// Desaturate toward BT.709 luminance by `amount` (0 = untouched, 1 = gray).
pub fn grayscale(img: &mut RgbaImage, amount: f32) {
    let amount = amount.clamp(0.0, 1.0);
    if amount == 0.0 {
        return;
    }
    for px in img.pixels_mut() {
        let luma = LUMA[0] * px[0] as f32 + LUMA[1] * px[1] as f32 + LUMA[2] * px[2] as f32;
        if amount == 1.0 {
            let v = luma.round().clamp(0.0, 255.0) as u8;
            px[0] = v;
            px[1] = v;
            px[2] = v;
            continue;
        }
        for c in 0..3 {
            let v = px[c] as f32 + (luma - px[c] as f32) * amount;
            px[c] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Darken toward black with distance from the image center.
///
/// `radius_x`/`radius_y` are clamped to half the image size. The blend amount
/// grows linearly with distance, reaching 0.9 at the corner of the radius box.
pub fn vignette(img: &mut RgbaImage, radius_x: f32, radius_y: f32) {
    let (w, h) = (img.width() as f32, img.height() as f32);
    let rx = if radius_x > 0.0 { radius_x.min(w * 0.5) } else { w * 0.5 };
    let ry = if radius_y > 0.0 { radius_y.min(h * 0.5) } else { h * 0.5 };
    let max_distance = (rx * rx + ry * ry).sqrt();
    if max_distance <= 0.0 {
        return;
    }
    let (cx, cy) = (w * 0.5, h * 0.5);

    for (x, y, px) in img.enumerate_pixels_mut() {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let distance = (dx * dx + dy * dy).sqrt();
        let amount = (VIGNETTE_FALLOFF * distance / max_distance).clamp(0.0, 1.0);
        let keep = 1.0 - amount;
        for c in 0..3 {
            px[c] = (px[c] as f32 * keep).round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample() -> RgbaImage {
        RgbaImage::from_fn(16, 8, |x, y| {
            Rgba([(x * 15) as u8, (y * 30) as u8, 200 - (x * 5) as u8, 255])
        })
    }

    #[test]
    fn test_grayscale_zero_is_identity() {
        let mut img = sample();
        grayscale(&mut img, 0.0);
        assert_eq!(img, sample());
    }

    #[test]
    fn test_grayscale_full_equal_channels() {
        let mut img = sample();
        grayscale(&mut img, 1.0);
        assert!(img.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
        assert!(img.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_grayscale_monotonic() {
        let original = sample();
        let spread = |img: &RgbaImage| -> u32 {
            img.pixels()
                .map(|p| {
                    let max = p[0].max(p[1]).max(p[2]) as u32;
                    let min = p[0].min(p[1]).min(p[2]) as u32;
                    max - min
                })
                .sum()
        };

        let mut previous = spread(&original);
        for step in 1..=10 {
            let mut img = original.clone();
            grayscale(&mut img, step as f32 / 10.0);
            let current = spread(&img);
            assert!(current <= previous, "saturation rose at step {}", step);
            previous = current;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn test_vignette_darkens_edges_more_than_center() {
        let mut img = RgbaImage::from_pixel(100, 60, Rgba([200, 200, 200, 255]));
        vignette(&mut img, 80.0, 42.0);
        let center = img.get_pixel(50, 30)[0];
        let edge = img.get_pixel(0, 30)[0];
        let corner = img.get_pixel(0, 0)[0];
        assert_eq!(center, 200);
        assert!(edge < center);
        assert!(corner < edge);
        // Alpha untouched.
        assert!(img.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_vignette_corner_strength() {
        let mut img = RgbaImage::from_pixel(100, 100, Rgba([100, 100, 100, 255]));
        vignette(&mut img, 1000.0, 1000.0);
        // Radii clamp to 50x50, corner distance ~= max distance.
        assert!(img.get_pixel(0, 0)[0] <= 11);
    }
}
