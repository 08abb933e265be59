//! Mapping document store.
//!
//! This module provides:
//! - `MappingSource`, the injectable backing loader, with embedded-resource,
//!   directory and closure implementations
//! - `MappingStore`, the name-keyed cache that never fails: missing or broken
//!   documents come back empty

mod source;
mod store;

pub use source::{DirectorySource, EmbeddedSource, MappingSource, SourceError};
pub use store::{LoadError, MappingStore};
