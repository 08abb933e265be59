//! Rectangular block copy and clear on whole textures.
//!
//! Rects passed here are already validated against the texture bounds.

use image::{Rgba, RgbaImage};

use crate::rect::PixelRect;

/// Fully transparent black, written over a destination before a block lands.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Copy the pixels under `rect` into a new block.
pub fn extract_region(image: &RgbaImage, rect: &PixelRect) -> RgbaImage {
    let (x, y, w, h) = rect.as_u32();
    image::imageops::crop_imm(image, x, y, w, h).to_image()
}

/// Set every pixel under `rect` to [`TRANSPARENT`].
pub fn clear_region(image: &mut RgbaImage, rect: &PixelRect) {
    let (x0, y0, w, h) = rect.as_u32();
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            image.put_pixel(x, y, TRANSPARENT);
        }
    }
}

/// Overwrite the pixels under `rect` with `block`, which must have the rect's size.
pub fn write_region(image: &mut RgbaImage, rect: &PixelRect, block: &RgbaImage) {
    let (x0, y0, w, h) = rect.as_u32();
    debug_assert_eq!(block.dimensions(), (w, h));
    for y in 0..h {
        for x in 0..w {
            image.put_pixel(x0 + x, y0 + y, *block.get_pixel(x, y));
        }
    }
}
