//! Cached, name-keyed mapping document store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{MappingDocument, MappingError};

use super::source::{MappingSource, SourceError};

/// Why a document could not be loaded. Never escapes [`MappingStore::load`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("mapping '{0}' not found")]
    NotFound(String),
    #[error("mapping '{name}': {source}")]
    Source {
        name: String,
        #[source]
        source: SourceError,
    },
    #[error("mapping '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: MappingError,
    },
}

/// Loads mapping documents by name and keeps them for the store's lifetime.
///
/// Every name is loaded at most once. A name that cannot be loaded (missing,
/// unreadable or unparseable) is cached as an empty document, so later calls
/// neither retry I/O nor log again.
///
/// The store is `Send + Sync`; share it through an `Arc` when several
/// remappers use it. The cache lock is not held while a document is read or
/// parsed, so two threads missing on the same name may both load it; the first
/// to finish is kept and both callers get that value.
pub struct MappingStore {
    source: Box<dyn MappingSource + Send + Sync>,
    cache: Mutex<HashMap<String, Arc<MappingDocument>>>,
}

impl std::fmt::Debug for MappingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingStore").field("cached", &self.len()).finish_non_exhaustive()
    }
}

impl MappingStore {
    pub fn new(source: impl MappingSource + Send + Sync + 'static) -> Self {
        Self { source: Box::new(source), cache: Mutex::new(HashMap::new()) }
    }

    /// Get the document for `name`, loading it on first request.
    ///
    /// Always returns a document; failures yield an empty one.
    pub fn load(&self, name: &str) -> Arc<MappingDocument> {
        if let Some(doc) = self.cache.lock().get(name) {
            debug!(mapping = name, "mapping cache hit");
            return Arc::clone(doc);
        }

        let doc = match self.try_load(name) {
            Ok(doc) => {
                debug!(mapping = name, entries = doc.len(), "loaded mapping");
                doc
            }
            Err(LoadError::NotFound(_)) => {
                debug!(mapping = name, "no mapping document, using empty mapping");
                MappingDocument::new()
            }
            Err(e) => {
                warn!("{}; using empty mapping", e);
                MappingDocument::new()
            }
        };

        let mut cache = self.cache.lock();
        Arc::clone(cache.entry(name.to_string()).or_insert_with(|| Arc::new(doc)))
    }

    /// Load and parse `name` from the source without touching the cache.
    ///
    /// Entry-level problems are logged and the offending entries dropped;
    /// only whole-document failures are returned.
    pub fn try_load(&self, name: &str) -> Result<MappingDocument, LoadError> {
        let text = self
            .source
            .open(name)
            .map_err(|source| LoadError::Source { name: name.to_string(), source })?
            .ok_or_else(|| LoadError::NotFound(name.to_string()))?;

        let parsed = MappingDocument::parse(&text)
            .map_err(|source| LoadError::Parse { name: name.to_string(), source })?;
        for warning in &parsed.warnings {
            warn!(mapping = name, "{}", warning);
        }
        Ok(parsed.document)
    }

    /// Whether `name` has been loaded (successfully or not).
    pub fn contains(&self, name: &str) -> bool {
        self.cache.lock().contains_key(name)
    }

    /// Number of cached names.
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cached names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.cache.lock().keys().cloned().collect();
        names.sort();
        names
    }
}
