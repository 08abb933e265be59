//! Core transform types
//!
//! Contains [`Rotation`], the four axis-aligned rotations a mapping entry may
//! request, and [`SpriteTransform`], the full geometric transform of one entry.

use serde::Serialize;

use crate::models::SpriteEntry;

/// A clockwise rotation by a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "u16")]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// Parse a rotation from degrees.
    ///
    /// Only 0, 90, 180 and 270 are accepted; anything else returns `None`.
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        if degrees.fract() != 0.0 {
            return None;
        }
        match degrees as i64 {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Cw90),
            180 => Some(Rotation::Cw180),
            270 => Some(Rotation::Cw270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }

    /// Whether the rotation exchanges width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Cw90 | Rotation::Cw270)
    }

    /// Size of a `width`×`height` block after this rotation.
    pub fn rotated_size(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// The geometric part of a mapping entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteTransform {
    pub rotation: Rotation,
    pub flip_h: bool,
    pub flip_v: bool,
    /// Rotate, then flip H, then flip V when true; flip H, flip V, then rotate
    /// when false.
    pub rotate_first: bool,
}

impl Default for SpriteTransform {
    fn default() -> Self {
        Self { rotation: Rotation::None, flip_h: false, flip_v: false, rotate_first: true }
    }
}

impl SpriteTransform {
    pub fn is_identity(&self) -> bool {
        self.rotation == Rotation::None && !self.flip_h && !self.flip_v
    }

    /// Size of a `width`×`height` block after this transform.
    pub fn output_size(&self, width: u32, height: u32) -> (u32, u32) {
        self.rotation.rotated_size(width, height)
    }
}

impl From<&SpriteEntry> for SpriteTransform {
    fn from(entry: &SpriteEntry) -> Self {
        Self {
            rotation: entry.rotate,
            flip_h: entry.flip_h,
            flip_v: entry.flip_v,
            rotate_first: entry.rotate_first,
        }
    }
}

/// Generate a plain-language description of a transform, used by `explain`.
///
/// # Examples
///
/// ```
/// use atlas_remap::transforms::{explain_transform, Rotation, SpriteTransform};
///
/// let t = SpriteTransform { rotation: Rotation::Cw90, flip_h: true, ..Default::default() };
/// assert_eq!(explain_transform(&t), "rotate 90° clockwise, then flip horizontally");
///
/// let t = SpriteTransform { rotate_first: false, ..t };
/// assert_eq!(explain_transform(&t), "flip horizontally, then rotate 90° clockwise");
/// ```
pub fn explain_transform(transform: &SpriteTransform) -> String {
    if transform.is_identity() {
        return "copy".to_string();
    }

    let rotate = match transform.rotation {
        Rotation::None => None,
        Rotation::Cw180 => Some("rotate 180°".to_string()),
        r => Some(format!("rotate {}° clockwise", r.degrees())),
    };
    let mut flips = Vec::new();
    if transform.flip_h {
        flips.push("flip horizontally".to_string());
    }
    if transform.flip_v {
        flips.push("flip vertically".to_string());
    }

    let mut steps = Vec::new();
    if transform.rotate_first {
        steps.extend(rotate);
        steps.extend(flips);
    } else {
        steps.extend(flips);
        steps.extend(rotate);
    }
    steps.join(", then ")
}
