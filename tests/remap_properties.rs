//! Integration tests for remap engine behavior
//!
//! Exercises the public API end to end: JSON documents through the mapping
//! store into the remap engine.

use std::sync::Arc;

use atlas_remap::models::{MappingDocument, SpriteEntry, SpriteRect};
use atlas_remap::rect::{Origin, PixelRect};
use atlas_remap::registry::{EmbeddedSource, MappingStore};
use atlas_remap::remap::{RemapOptions, RemapOutcome, Remapper, TextureRemapper};
use atlas_remap::transforms::Rotation;
use image::{Rgba, RgbaImage};

/// Every pixel distinct: red = x, green = y, blue = x ^ y.
fn pattern(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, (x ^ y) as u8, 255]))
}

fn top_left() -> Remapper {
    Remapper::new(RemapOptions { rect_origin: Origin::TopLeft, pixel_origin: Origin::TopLeft })
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> SpriteRect {
    SpriteRect::new(x, y, w, h)
}

fn moved(src: SpriteRect, dst: SpriteRect) -> SpriteEntry {
    SpriteEntry::new(src).with_dst(dst)
}

fn remapped(remapper: &Remapper, image: &RgbaImage, doc: &MappingDocument) -> RgbaImage {
    match remapper.remap(image, doc) {
        RemapOutcome::Remapped(out) => out,
        RemapOutcome::Unchanged => panic!("expected a remap"),
    }
}

fn region(image: &RgbaImage, x: u32, y: u32, w: u32, h: u32) -> RgbaImage {
    image::imageops::crop_imm(image, x, y, w, h).to_image()
}

#[test]
fn test_pixels_outside_destinations_unchanged() {
    let image = pattern(32, 32);
    let doc = MappingDocument::new()
        .with_entry("a", moved(rect(0.0, 0.0, 4.0, 4.0), rect(20.0, 20.0, 4.0, 4.0)))
        .with_entry(
            "b",
            moved(rect(4.0, 0.0, 4.0, 2.0), rect(0.0, 24.0, 2.0, 4.0)).with_rotate(Rotation::Cw90),
        )
        .with_entry("c", moved(rect(8.0, 8.0, 2.0, 2.0), rect(10.0, 0.0, 6.0, 6.0)));

    let out = remapped(&top_left(), &image, &doc);
    let dsts = [
        PixelRect::new(20, 20, 4, 4),
        PixelRect::new(0, 24, 2, 4),
        PixelRect::new(10, 0, 6, 6),
    ];

    for (x, y, pixel) in out.enumerate_pixels() {
        let touched = dsts.iter().any(|r| r.intersects(&PixelRect::new(x as i64, y as i64, 1, 1)));
        if !touched {
            assert_eq!(pixel, image.get_pixel(x, y), "pixel ({}, {}) changed", x, y);
        }
    }
    assert_eq!(out.dimensions(), image.dimensions());
}

#[test]
fn test_rotate_90_then_270_round_trip() {
    let image = pattern(16, 16);
    let remapper = top_left();

    // 4x2 block at (1,1) goes to a 2x4 slot at (10,2) and back again
    let forward = MappingDocument::new().with_entry(
        "s",
        moved(rect(1.0, 1.0, 4.0, 2.0), rect(10.0, 2.0, 2.0, 4.0)).with_rotate(Rotation::Cw90),
    );
    let back = MappingDocument::new().with_entry(
        "s",
        moved(rect(10.0, 2.0, 2.0, 4.0), rect(1.0, 1.0, 4.0, 2.0)).with_rotate(Rotation::Cw270),
    );

    let once = remapped(&remapper, &image, &forward);
    let twice = remapped(&remapper, &once, &back);

    assert_eq!(region(&twice, 1, 1, 4, 2), region(&image, 1, 1, 4, 2));
}

#[test]
fn test_flip_h_twice_is_identity() {
    let image = pattern(8, 8);
    let doc = MappingDocument::new()
        .with_entry("f", SpriteEntry::new(rect(2.0, 2.0, 5.0, 3.0)).with_flips(true, false));

    let once = remapped(&top_left(), &image, &doc);
    assert_ne!(once, image);
    let twice = remapped(&top_left(), &once, &doc);
    assert_eq!(twice, image);
}

#[test]
fn test_source_out_of_bounds_region_untouched() {
    let image = pattern(16, 16);
    let doc = MappingDocument::new()
        .with_entry("oob", moved(rect(12.0, 12.0, 8.0, 8.0), rect(0.0, 0.0, 8.0, 8.0)));

    let (outcome, report) = top_left().remap_with_report(&image, &doc);
    let out = outcome.into_image().expect("non-empty document still remaps");

    assert_eq!(region(&out, 0, 0, 8, 8), region(&image, 0, 0, 8, 8));
    assert_eq!(out, image);
    assert_eq!(report.applied_count(), 0);
}

#[test]
fn test_empty_document_reports_unchanged() {
    let image = pattern(4, 4);
    let doc = MappingDocument::from_json(r#"{"sprites": {}}"#).unwrap();
    assert_eq!(Remapper::default().remap(&image, &doc), RemapOutcome::Unchanged);
}

#[test]
fn test_nearest_neighbor_2x2_to_4x4() {
    let mut image = RgbaImage::new(8, 8);
    let colors = [
        Rgba([255, 0, 0, 255]),
        Rgba([0, 255, 0, 255]),
        Rgba([0, 0, 255, 255]),
        Rgba([255, 255, 0, 255]),
    ];
    image.put_pixel(0, 0, colors[0]);
    image.put_pixel(1, 0, colors[1]);
    image.put_pixel(0, 1, colors[2]);
    image.put_pixel(1, 1, colors[3]);

    let doc = MappingDocument::new()
        .with_entry("grow", moved(rect(0.0, 0.0, 2.0, 2.0), rect(4.0, 4.0, 4.0, 4.0)));
    let out = remapped(&top_left(), &image, &doc);
    let grown = region(&out, 4, 4, 4, 4);

    for color in colors {
        assert_eq!(grown.pixels().filter(|p| **p == color).count(), 4);
    }
    assert_eq!(*grown.get_pixel(0, 0), colors[0]);
    assert_eq!(*grown.get_pixel(1, 1), colors[0]);
    assert_eq!(*grown.get_pixel(2, 0), colors[1]);
    assert_eq!(*grown.get_pixel(0, 3), colors[2]);
    assert_eq!(*grown.get_pixel(3, 3), colors[3]);
}

/// Expected pixel of an 8x8 block rotated 90° clockwise.
fn rotated_90(block: &RgbaImage, x: u32, y: u32) -> Rgba<u8> {
    *block.get_pixel(y, 7 - x)
}

#[test]
fn test_64x64_rotate_scenario_top_left() {
    let image = pattern(64, 64);
    let json = r#"{"sprites": {"icon": {
        "src": {"x": 0, "y": 0, "w": 8, "h": 8},
        "dst": {"x": 16, "y": 16, "w": 8, "h": 8},
        "rotate": 90, "flipH": false, "flipV": false, "rotateFirst": true
    }}}"#;
    let doc = MappingDocument::from_json(json).unwrap();

    let out = remapped(&top_left(), &image, &doc);
    let block = region(&image, 0, 0, 8, 8);

    for y in 0..64 {
        for x in 0..64 {
            let expected = if (16..24).contains(&x) && (16..24).contains(&y) {
                rotated_90(&block, x - 16, y - 16)
            } else {
                *image.get_pixel(x, y)
            };
            assert_eq!(*out.get_pixel(x, y), expected, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_64x64_rotate_scenario_bottom_left() {
    // Same document read with bottom-left rects: src rows 56..64, dst rows 40..48
    let image = pattern(64, 64);
    let json = r#"{"sprites": {"icon": {
        "src": {"x": 0, "y": 0, "w": 8, "h": 8},
        "dst": {"x": 16, "y": 16, "w": 8, "h": 8},
        "rotate": 90
    }}}"#;
    let doc = MappingDocument::from_json(json).unwrap();

    let out = remapped(&Remapper::default(), &image, &doc);
    let block = region(&image, 0, 56, 8, 8);

    for y in 0..64 {
        for x in 0..64 {
            let expected = if (16..24).contains(&x) && (40..48).contains(&y) {
                rotated_90(&block, x - 16, y - 40)
            } else {
                *image.get_pixel(x, y)
            };
            assert_eq!(*out.get_pixel(x, y), expected, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_store_returns_same_cached_document() {
    let json = r#"{"sprites": {"a": {"src": {"x": 0, "y": 0, "w": 1, "h": 1}}}}"#;
    let store = MappingStore::new(EmbeddedSource::new(&[("Mappings/HUD.json", json)]));

    let first = store.load("hud.json");
    let second = store.load("hud.json");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
    assert_eq!(*first, MappingDocument::from_json(json).unwrap());
}

#[test]
fn test_broken_document_falls_back_to_original() {
    let store = Arc::new(MappingStore::new(EmbeddedSource::new(&[(
        "broken.json",
        r#"{"sprites": {"a": "#,
    )])));
    let remapper = TextureRemapper::new("broken.json", Arc::clone(&store));

    let image = pattern(4, 4);
    let result = remapper.try_remap(&image).or_original(image.clone());
    assert_eq!(result, image);
    assert!(store.load("broken.json").is_empty());
}

#[test]
fn test_texture_remapper_end_to_end() {
    // Bottom-up rows and bottom-left rects, as a host engine hands them over
    let json = r#"{"sprites": {
        "heart": {"src": {"x": 0, "y": 0, "w": 2, "h": 2}, "dst": {"x": 6, "y": 6, "w": 2, "h": 2}, "flipV": true},
        "ghost": {"src": {"x": 100, "y": 0, "w": 2, "h": 2}}
    }}"#;
    let store = Arc::new(MappingStore::new(EmbeddedSource::new(&[("hud.json", json)])));
    let remapper = TextureRemapper::new("hud.json", store).with_options(RemapOptions {
        rect_origin: Origin::BottomLeft,
        pixel_origin: Origin::BottomLeft,
    });

    let image = pattern(8, 8);
    let out = remapper.try_remap(&image).into_image().unwrap();

    // Stored rows 0..2 flipped vertically land in stored rows 6..8, columns 6..8
    assert_eq!(*out.get_pixel(6, 6), *image.get_pixel(0, 1));
    assert_eq!(*out.get_pixel(7, 7), *image.get_pixel(1, 0));
    assert_eq!(*out.get_pixel(0, 0), *image.get_pixel(0, 0));
}
