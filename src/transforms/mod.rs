//! Geometric operations on sprite blocks
//!
//! # Module Structure
//!
//! - [`types`] - Rotation and per-entry transform types
//! - [`apply`] - Rotate/flip application in entry order
//! - [`scale`] - Nearest-neighbor resizing
//! - [`region`] - Block extract, clear and write on whole textures

pub mod apply;
pub mod region;
pub mod scale;
pub mod types;

pub use apply::{apply_sprite_transform, rotate_image};
pub use region::{clear_region, extract_region, write_region, TRANSPARENT};
pub use scale::scale_nearest;
pub use types::{explain_transform, Rotation, SpriteTransform};
