//! Nearest-neighbor resizing of sprite blocks

use image::RgbaImage;

/// Resize a block to `dst_width`×`dst_height` with nearest-neighbor sampling.
///
/// Destination pixel `(x, y)` takes source pixel
/// `(floor(x * src_w / dst_w), floor(y * src_h / dst_h))`. No filtering, so
/// upscaling by an integer factor replicates each pixel into a square block.
///
/// Returns the input unchanged when the sizes already match. Zero-sized
/// targets yield an empty image.
pub fn scale_nearest(image: &RgbaImage, dst_width: u32, dst_height: u32) -> RgbaImage {
    let (src_width, src_height) = image.dimensions();
    if (src_width, src_height) == (dst_width, dst_height) {
        return image.clone();
    }
    if src_width == 0 || src_height == 0 || dst_width == 0 || dst_height == 0 {
        return RgbaImage::new(dst_width, dst_height);
    }

    RgbaImage::from_fn(dst_width, dst_height, |x, y| {
        let src_x = (u64::from(x) * u64::from(src_width) / u64::from(dst_width)) as u32;
        let src_y = (u64::from(y) * u64::from(src_height) / u64::from(dst_height)) as u32;
        *image.get_pixel(src_x, src_y)
    })
}
