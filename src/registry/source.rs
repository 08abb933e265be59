//! Backing sources for mapping documents.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error reading a document from its source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// File I/O error
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Any other failure reported by a host-provided source
    #[error("{0}")]
    Other(String),
}

/// Where a [`MappingStore`](super::MappingStore) gets document text from.
///
/// `Ok(None)` means no document with that name exists; the store treats it
/// the same as an empty document.
pub trait MappingSource {
    fn open(&self, name: &str) -> Result<Option<String>, SourceError>;
}

impl<F> MappingSource for F
where
    F: Fn(&str) -> Result<Option<String>, SourceError>,
{
    fn open(&self, name: &str) -> Result<Option<String>, SourceError> {
        self(name)
    }
}

/// Documents compiled into the binary, e.g. with `include_str!`.
///
/// Lookup matches the end of each resource name case-insensitively, so
/// `"hud.json"` finds a resource registered as `"mappings/HUD.json"`. The first
/// match in registration order wins.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedSource {
    resources: Vec<(&'static str, &'static str)>,
}

impl EmbeddedSource {
    pub fn new(resources: &[(&'static str, &'static str)]) -> Self {
        Self { resources: resources.to_vec() }
    }

    pub fn with_resource(mut self, name: &'static str, contents: &'static str) -> Self {
        self.resources.push((name, contents));
        self
    }

    fn find(&self, name: &str) -> Option<&'static str> {
        let wanted = name.to_ascii_lowercase();
        self.resources
            .iter()
            .find(|(resource, _)| resource.to_ascii_lowercase().ends_with(&wanted))
            .map(|(_, contents)| *contents)
    }
}

impl MappingSource for EmbeddedSource {
    fn open(&self, name: &str) -> Result<Option<String>, SourceError> {
        if name.is_empty() {
            return Ok(None);
        }
        Ok(self.find(name).map(str::to_string))
    }
}

/// Documents stored as files in a directory.
///
/// A name without an extension gets `.json` appended.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a document name resolves to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let path = self.root.join(name);
        if path.extension().is_some() {
            path
        } else {
            path.with_extension("json")
        }
    }
}

impl MappingSource for DirectorySource {
    fn open(&self, name: &str) -> Result<Option<String>, SourceError> {
        let path = self.path_for(name);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SourceError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_suffix_match_case_insensitive() {
        let source = EmbeddedSource::new(&[
            ("assets.mappings.HUD.json", r#"{"sprites": {}}"#),
            ("assets.mappings.inventory.json", "{}"),
        ]);

        assert_eq!(source.open("hud.json").unwrap().as_deref(), Some(r#"{"sprites": {}}"#));
        assert_eq!(source.open("Inventory.JSON").unwrap().as_deref(), Some("{}"));
        assert_eq!(source.open("missing.json").unwrap(), None);
        assert_eq!(source.open("").unwrap(), None);
    }

    #[test]
    fn test_embedded_first_registered_match_wins() {
        let source = EmbeddedSource::default()
            .with_resource("base/hud.json", "first")
            .with_resource("mods/hud.json", "second");

        assert_eq!(source.open("hud.json").unwrap().as_deref(), Some("first"));
        assert_eq!(source.open("mods/HUD.json").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_directory_source_reads_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hud.json"), "{}").unwrap();
        let source = DirectorySource::new(dir.path());

        assert_eq!(source.open("hud").unwrap().as_deref(), Some("{}"));
        assert_eq!(source.open("hud.json").unwrap().as_deref(), Some("{}"));
        assert_eq!(source.open("other").unwrap(), None);
    }

    #[test]
    fn test_directory_source_io_error() {
        let dir = TempDir::new().unwrap();
        // A directory where a file is expected cannot be read as text
        fs::create_dir(dir.path().join("broken.json")).unwrap();
        let source = DirectorySource::new(dir.path());

        assert!(matches!(source.open("broken"), Err(SourceError::Io { .. })));
    }

    #[test]
    fn test_closure_source() {
        let source = |name: &str| -> Result<Option<String>, SourceError> {
            Ok((name == "a").then(|| "{}".to_string()))
        };
        assert!(source.open("a").unwrap().is_some());
        assert!(source.open("b").unwrap().is_none());
    }
}
