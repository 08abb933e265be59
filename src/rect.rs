//! Pixel rectangles and origin conversion
//!
//! Mapping documents describe rects with a bottom-left origin by default,
//! matching the host engine's texture coordinates, while all pixel work is done
//! on top-left-origin buffers. [`PixelRect::from_sprite_rect`] is the one place
//! where document rects cross into buffer space, and [`convert_rows`] is the one
//! place where whole buffers cross between row orders.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::SpriteRect;

/// Which corner `(0, 0)` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// y grows upward from the bottom edge
    BottomLeft,
    /// y grows downward from the top edge
    TopLeft,
}

/// An integer rectangle in top-left buffer space.
///
/// Components are signed and wide so that out-of-range document values
/// survive conversion and are rejected by [`PixelRect::check_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

/// Why a rect cannot be used against a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RectError {
    #[error("empty rect {0}")]
    Empty(PixelRect),
    #[error("rect {rect} exceeds {width}x{height} texture")]
    OutOfBounds { rect: PixelRect, width: u32, height: u32 },
}

impl std::fmt::Display for PixelRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.w, self.h, self.x, self.y)
    }
}

/// Round to the nearest integer, ties to even.
fn round_coord(value: f32) -> i64 {
    value.round_ties_even() as i64
}

impl PixelRect {
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }

    /// Round a document rect to whole pixels and convert it to top-left space.
    ///
    /// For a bottom-left document, `top_y = buffer_height - y - h`.
    pub fn from_sprite_rect(rect: &SpriteRect, buffer_height: u32, origin: Origin) -> Self {
        let x = round_coord(rect.x);
        let y = round_coord(rect.y);
        let w = round_coord(rect.w);
        let h = round_coord(rect.h);

        let y = match origin {
            Origin::TopLeft => y,
            Origin::BottomLeft => i64::from(buffer_height).saturating_sub(y).saturating_sub(h),
        };
        Self { x, y, w, h }
    }

    /// Check that the rect has positive extent and lies fully inside a
    /// `width`×`height` buffer.
    pub fn check_bounds(&self, width: u32, height: u32) -> Result<(), RectError> {
        if self.w <= 0 || self.h <= 0 {
            return Err(RectError::Empty(*self));
        }
        let fits = self.x >= 0
            && self.y >= 0
            && self.x.saturating_add(self.w) <= i64::from(width)
            && self.y.saturating_add(self.h) <= i64::from(height);
        if !fits {
            return Err(RectError::OutOfBounds { rect: *self, width, height });
        }
        Ok(())
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.check_bounds(width, height).is_ok()
    }

    /// `(x, y, w, h)` as buffer indices. Only meaningful once
    /// [`check_bounds`](Self::check_bounds) has passed.
    pub fn as_u32(&self) -> (u32, u32, u32, u32) {
        (self.x as u32, self.y as u32, self.w as u32, self.h as u32)
    }

    /// Whether two rects share at least one pixel.
    pub fn intersects(&self, other: &PixelRect) -> bool {
        self.x < other.x.saturating_add(other.w)
            && other.x < self.x.saturating_add(self.w)
            && self.y < other.y.saturating_add(other.h)
            && other.y < self.y.saturating_add(self.h)
    }
}

/// Convert a buffer between its external row order and top-left row order.
///
/// Bottom-left buffers store their bottom row first, so the conversion is a
/// vertical flip; applying it twice restores the original.
pub fn convert_rows(image: RgbaImage, origin: Origin) -> RgbaImage {
    match origin {
        Origin::TopLeft => image,
        Origin::BottomLeft => {
            let mut image = image;
            image::imageops::flip_vertical_in_place(&mut image);
            image
        }
    }
}
