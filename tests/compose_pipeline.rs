mod common;

use std::fs;

use post_thumbnail::composer::{self, Composer};
use post_thumbnail::config::{Overrides, ThumbnailConfig};
use post_thumbnail::graphics::{Canvas, SourceImage, TextRenderer};
use post_thumbnail::{FontRegistry, LayoutConfig, ThumbnailError};

use common::{test_font, write_background, write_png};

/// Lay out a post directory: background, tag icons, author icon and a font.
fn post_dir(tags: &[&str]) -> Option<(tempfile::TempDir, ThumbnailConfig)> {
    let font = test_font()?;
    let dir = tempfile::tempdir().unwrap();
    let fonts = dir.path().join("fonts").join("nested");
    fs::create_dir_all(&fonts).unwrap();
    fs::copy(&font, fonts.join("TitleBold.ttf")).unwrap();

    let background = dir.path().join("background.png");
    write_background(&background, 2400, 1000);
    write_png(&dir.path().join("me.png"), 256, 256, [200, 50, 50, 255]);
    for tag in tags {
        write_png(&dir.path().join(format!("{}.png", tag)), 300, 150, [50, 200, 50, 255]);
    }

    let config = ThumbnailConfig::from_layers(&[Overrides {
        background: Some(background),
        title: Some(vec!["Hello".to_string(), "World".to_string()]),
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        font_dir: Some(dir.path().join("fonts")),
        font_family: Some("TitleBold".to_string()),
        ..Overrides::default()
    }])
    .unwrap();
    Some((dir, config))
}

#[test]
fn test_end_to_end_writes_thumbnail() {
    let Some((dir, config)) = post_dir(&[]) else { return };

    let output = post_thumbnail::run(&config).unwrap();
    assert_eq!(output, dir.path().join("thumbnail.jpeg"));

    let decoded = image::open(&output).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (1200, 675));

    // Author badge sits at (60, 60) with height 120 and stays reddish after JPEG.
    let badge = decoded.get_pixel(120, 120);
    assert!(badge[0] > 150 && badge[1] < 110, "author badge missing: {:?}", badge);
}

#[test]
fn test_end_to_end_with_tags_and_rerun_overwrites() {
    let Some((_dir, config)) = post_dir(&["rust", "cli"]) else { return };

    let first = post_thumbnail::run(&config).unwrap();
    let second = post_thumbnail::run(&config).unwrap();
    assert_eq!(first, second);

    let decoded = image::open(&second).unwrap().to_rgb8();
    // 300x150 icons become 160x80 badges: rust at x 980..1140, cli at 780..940.
    for x in [1060, 860] {
        let px = decoded.get_pixel(x, 100);
        assert!(px[1] > 150 && px[0] < 110, "tag badge missing at {}: {:?}", x, px);
    }
}

#[test]
fn test_missing_author_icon_fails_without_output() {
    let Some((dir, mut config)) = post_dir(&[]) else { return };
    config.author = "nobody".to_string();

    let err = post_thumbnail::run(&config).unwrap_err();
    assert!(matches!(err, ThumbnailError::MissingAsset { .. }), "{}", err);
    assert!(!dir.path().join("thumbnail.jpeg").exists());
}

#[test]
fn test_unknown_font_family() {
    let Some((_dir, mut config)) = post_dir(&[]) else { return };
    config.font_family = "Comic Serif Ultra".to_string();

    let err = post_thumbnail::run(&config).unwrap_err();
    assert!(matches!(err, ThumbnailError::FontNotFound { .. }));
}

#[test]
fn test_missing_background() {
    let dir = tempfile::tempdir().unwrap();
    let config = ThumbnailConfig::new(dir.path().join("nope.jpg"), vec!["Title".to_string()]);

    let err = post_thumbnail::assets::Assets::load(&config).err().unwrap();
    assert!(matches!(err, ThumbnailError::MissingAsset { .. }));
}

#[test]
fn test_compose_is_deterministic() {
    let Some(font_path) = test_font() else { return };
    let mut registry = FontRegistry::new();
    registry.install_file(&font_path).unwrap();
    let font = registry.family(font_path.file_stem().unwrap().to_str().unwrap()).unwrap();

    let layout = LayoutConfig::default();
    let background = SourceImage::from_rgba(image::RgbaImage::from_fn(1600, 900, |x, y| {
        image::Rgba([(x % 200) as u8, (y % 200) as u8, 90, 255])
    }));
    let tag = SourceImage::from_rgba(image::RgbaImage::from_pixel(64, 32, image::Rgba([1, 2, 3, 200])));
    let author = SourceImage::from_rgba(image::RgbaImage::from_pixel(50, 50, image::Rgba([9, 9, 9, 255])));

    let composer = Composer::new(&layout, font);
    let a = composer.compose(&background, "Hello\nWorld", &[tag.clone()], &author);
    let b = composer.compose(&background, "Hello\nWorld", &[tag], &author);
    assert_eq!(a.width(), 1200);
    assert_eq!(a.height(), 675);
    assert!(a == b);
}

#[test]
fn test_title_layout_contract() {
    let Some(font_path) = test_font() else { return };
    let mut registry = FontRegistry::new();
    let name = registry.install_file(&font_path).unwrap().to_string();
    let font = registry.family(&name).unwrap();

    let layout = LayoutConfig::default();
    let composer = Composer::new(&layout, font);
    let mut canvas = composer.blank_canvas();
    let title = "Reusable Build Components with\nDefault Interface Implementations";
    let boxes = composer.draw_title(&mut canvas, title);
    assert!(!boxes.is_empty());

    let left = layout.border_padding as i64;
    let right = left + layout.title_wrap_width() as i64;
    let top = (675.0 * layout.title_anchor_ratio) as i64;
    for glyph in &boxes {
        assert!(glyph.x >= left - 8, "glyph {:?} left of margin", glyph);
        assert!(glyph.right() <= right + 2, "glyph {:?} past wrap width", glyph);
        assert!(glyph.y >= top, "glyph {:?} above anchor", glyph);
    }

    // Lines run top to bottom: the 'D' of the second line is below the 'R' of the first.
    let first = boxes.iter().find(|g| g.ch == 'R').unwrap();
    let second = boxes.iter().find(|g| g.ch == 'D').unwrap();
    assert!(second.y > first.bottom() - 5);

    // Fill is near-white, the outline near-black.
    let white = canvas.pixels().pixels().filter(|p| p[0] >= 240).count();
    assert!(white > 100);
}

#[test]
fn test_narrow_wrap_breaks_words() {
    let Some(font_path) = test_font() else { return };
    let mut registry = FontRegistry::new();
    let name = registry.install_file(&font_path).unwrap().to_string();
    let font = registry.family(&name).unwrap();

    let renderer = TextRenderer::new(font);
    let wide = renderer.measure("alpha beta gamma", (0.0, 0.0), 10_000.0, 40.0);
    let narrow = renderer.measure("alpha beta gamma", (0.0, 0.0), 200.0, 40.0);
    let rows = |boxes: &[post_thumbnail::graphics::text::GlyphBox]| {
        let mut tops: Vec<i64> = boxes.iter().map(|g| g.bottom()).collect();
        tops.sort();
        tops.dedup_by(|a, b| (*a - *b).abs() < 20);
        tops.len()
    };
    assert_eq!(rows(&wide), 1);
    assert!(rows(&narrow) >= 2);
    assert!(narrow.iter().all(|g| g.right() <= 201));
}

#[test]
fn test_encode_failure_reported() {
    let layout = LayoutConfig::default();
    let canvas = Canvas::new(layout.canvas_width, layout.canvas_height, image::Rgb([0, 0, 0]));
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be makes the rename fail.
    let target = dir.path().join("thumbnail.jpeg");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("keep"), b"x").unwrap();

    let err = composer::encode_jpeg(canvas, &target, 75).unwrap_err();
    assert!(matches!(err, ThumbnailError::EncodingFailure { .. }));
    // No temp file left behind.
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}
