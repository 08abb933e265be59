//! Remap engine: rebuild a texture according to a mapping document.
//!
//! The engine never fails outward. Every entry that cannot be applied is
//! skipped, and anything unexpected during the whole pass turns the call into
//! [`RemapOutcome::Unchanged`], leaving the caller with its original texture.
//!
//! # Module Structure
//!
//! - [`engine`] - [`Remapper`] and the per-entry pipeline
//! - [`report`] - Per-entry results of a remap pass
//! - [`texture`] - [`TextureRemapper`], remapping by mapping name

pub mod engine;
pub mod report;
pub mod texture;

pub use engine::{resolve_entry, RemapError, RemapOptions, RemapOutcome, Remapper, ResolvedEntry};
pub use report::{EntryOutcome, RemapReport, SkipReason};
pub use texture::TextureRemapper;
