//! Transform application to sprite blocks
//!
//! Every operation here is an exact permutation of pixel positions; no
//! interpolation or blending ever happens.

use image::RgbaImage;

use super::types::{Rotation, SpriteTransform};

/// Rotate a block clockwise.
pub fn rotate_image(image: &RgbaImage, rotation: Rotation) -> RgbaImage {
    match rotation {
        Rotation::None => image.clone(),
        Rotation::Cw90 => image::imageops::rotate90(image),
        Rotation::Cw180 => image::imageops::rotate180(image),
        Rotation::Cw270 => image::imageops::rotate270(image),
    }
}

fn apply_flips(image: RgbaImage, flip_h: bool, flip_v: bool) -> RgbaImage {
    let mut result = image;
    if flip_h {
        image::imageops::flip_horizontal_in_place(&mut result);
    }
    if flip_v {
        image::imageops::flip_vertical_in_place(&mut result);
    }
    result
}

/// Apply an entry's transform to an extracted block.
///
/// With `rotate_first` the order is rotate, flip H, flip V; otherwise flip H,
/// flip V, rotate. Rotations by 90 and 270 swap the block's width and height.
pub fn apply_sprite_transform(image: &RgbaImage, transform: &SpriteTransform) -> RgbaImage {
    if transform.rotate_first {
        let rotated = rotate_image(image, transform.rotation);
        apply_flips(rotated, transform.flip_h, transform.flip_v)
    } else {
        let flipped = apply_flips(image.clone(), transform.flip_h, transform.flip_v);
        match transform.rotation {
            Rotation::None => flipped,
            rotation => rotate_image(&flipped, rotation),
        }
    }
}
