//! Atlas-remap - Library for remapping sprite-atlas textures
//!
//! This library provides functionality to:
//! - Parse JSON mapping documents describing named sprite regions
//! - Cache mapping documents by name with an injectable backing source
//! - Rebuild a texture by moving, rotating, flipping and rescaling those
//!   regions, falling back to the original texture on any failure

pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod rect;
pub mod registry;
pub mod remap;
pub mod transforms;
