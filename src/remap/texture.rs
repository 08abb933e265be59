//! Remapping by mapping name.

use std::sync::Arc;

use image::RgbaImage;

use crate::registry::MappingStore;

use super::engine::{RemapOptions, RemapOutcome, Remapper};

/// Remaps textures with one named mapping document from a shared store.
#[derive(Debug, Clone)]
pub struct TextureRemapper {
    mapping_name: String,
    store: Arc<MappingStore>,
    remapper: Remapper,
}

impl TextureRemapper {
    pub fn new(mapping_name: impl Into<String>, store: Arc<MappingStore>) -> Self {
        Self { mapping_name: mapping_name.into(), store, remapper: Remapper::default() }
    }

    pub fn with_options(mut self, options: RemapOptions) -> Self {
        self.remapper = Remapper::new(options);
        self
    }

    pub fn mapping_name(&self) -> &str {
        &self.mapping_name
    }

    /// Remap `texture` with this remapper's document.
    ///
    /// Returns [`RemapOutcome::Unchanged`] when the document is missing,
    /// broken or empty, or when the remap itself fails.
    pub fn try_remap(&self, texture: &RgbaImage) -> RemapOutcome {
        let doc = self.store.load(&self.mapping_name);
        if doc.is_empty() {
            return RemapOutcome::Unchanged;
        }
        self.remapper.remap(texture, &doc)
    }
}
