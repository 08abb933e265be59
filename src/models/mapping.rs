//! Mapping document types and lenient JSON parsing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::transforms::Rotation;

/// Errors that make a whole mapping document unusable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MappingError {
    /// The text is not valid JSON or `sprites` is not an object
    #[error("invalid mapping document: {0}")]
    Json(#[from] serde_json::Error),
}

/// A rectangle as written in a mapping document.
///
/// Coordinates are floating point and are rounded to whole pixels before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl SpriteRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// One remap rule: move the `src` region to `dst`, transforming it on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteEntry {
    /// Region read from the input texture
    pub src: SpriteRect,
    /// Region written in the output texture (`None` means same as `src`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst: Option<SpriteRect>,
    /// Clockwise rotation
    pub rotate: Rotation,
    /// Mirror left-right
    pub flip_h: bool,
    /// Mirror top-bottom
    pub flip_v: bool,
    /// Rotate before flipping (true) or flip before rotating (false)
    pub rotate_first: bool,
}

impl SpriteEntry {
    /// An entry that copies `src` in place with no transform.
    pub fn new(src: SpriteRect) -> Self {
        Self {
            src,
            dst: None,
            rotate: Rotation::None,
            flip_h: false,
            flip_v: false,
            rotate_first: true,
        }
    }

    pub fn with_dst(mut self, dst: SpriteRect) -> Self {
        self.dst = Some(dst);
        self
    }

    pub fn with_rotate(mut self, rotate: Rotation) -> Self {
        self.rotate = rotate;
        self
    }

    pub fn with_flips(mut self, flip_h: bool, flip_v: bool) -> Self {
        self.flip_h = flip_h;
        self.flip_v = flip_v;
        self
    }

    pub fn with_rotate_first(mut self, rotate_first: bool) -> Self {
        self.rotate_first = rotate_first;
        self
    }

    /// The destination rect, falling back to `src` when absent.
    pub fn destination(&self) -> SpriteRect {
        self.dst.unwrap_or(self.src)
    }
}

/// Entry exactly as it appears in JSON; every field may be missing or null.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    #[serde(default)]
    src: Option<SpriteRect>,
    #[serde(default)]
    dst: Option<SpriteRect>,
    #[serde(default)]
    rotate: Option<f64>,
    #[serde(default)]
    flip_h: Option<bool>,
    #[serde(default)]
    flip_v: Option<bool>,
    #[serde(default)]
    rotate_first: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    sprites: Option<Map<String, Value>>,
}

/// A problem with a single entry. The entry is dropped or defaulted; the rest
/// of the document still loads.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryWarning {
    pub entry: String,
    pub message: String,
}

impl EntryWarning {
    fn new(entry: &str, message: impl Into<String>) -> Self {
        Self { entry: entry.to_string(), message: message.into() }
    }
}

impl std::fmt::Display for EntryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sprite '{}': {}", self.entry, self.message)
    }
}

/// Result of parsing: the usable document plus per-entry warnings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedDocument {
    pub document: MappingDocument,
    pub warnings: Vec<EntryWarning>,
}

/// Named sprite entries in document order.
///
/// Entry names are unique. Entries are applied independently; when two
/// destinations overlap, the later entry wins.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MappingDocument {
    sprites: Vec<(String, SpriteEntry)>,
}

impl MappingDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self { sprites: Vec::new() }
    }

    /// Add an entry, replacing any existing entry with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, entry: SpriteEntry) {
        let name = name.into();
        match self.sprites.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = entry,
            None => self.sprites.push((name, entry)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_entry(mut self, name: impl Into<String>, entry: SpriteEntry) -> Self {
        self.insert(name, entry);
        self
    }

    pub fn get(&self, name: &str) -> Option<&SpriteEntry> {
        self.sprites.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Iterate entries in application order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SpriteEntry)> {
        self.sprites.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sprites.iter().map(|(n, _)| n.as_str())
    }

    /// Parse a mapping document, discarding entry warnings.
    pub fn from_json(text: &str) -> Result<Self, MappingError> {
        Ok(Self::parse(text)?.document)
    }

    /// Parse a mapping document.
    ///
    /// Fails only when the text as a whole is unusable. Entries without a
    /// `src`, with a partial `dst`, or with mistyped fields are dropped and
    /// reported as warnings. Missing optional fields take their defaults.
    pub fn parse(text: &str) -> Result<ParsedDocument, MappingError> {
        let raw: RawDocument = serde_json::from_str(text)?;
        let mut parsed = ParsedDocument::default();

        for (name, value) in raw.sprites.unwrap_or_default() {
            let raw_entry: RawEntry = match serde_json::from_value(value) {
                Ok(e) => e,
                Err(e) => {
                    parsed.warnings.push(EntryWarning::new(&name, format!("dropped: {}", e)));
                    continue;
                }
            };

            let Some(src) = raw_entry.src else {
                parsed.warnings.push(EntryWarning::new(&name, "dropped: missing 'src'"));
                continue;
            };

            let rotate = match raw_entry.rotate {
                None => Rotation::None,
                Some(degrees) => Rotation::from_degrees(degrees).unwrap_or_else(|| {
                    parsed.warnings.push(EntryWarning::new(
                        &name,
                        format!("unsupported rotation {}, using 0", degrees),
                    ));
                    Rotation::None
                }),
            };

            parsed.document.insert(
                name,
                SpriteEntry {
                    src,
                    dst: raw_entry.dst,
                    rotate,
                    flip_h: raw_entry.flip_h.unwrap_or(false),
                    flip_v: raw_entry.flip_v.unwrap_or(false),
                    rotate_first: raw_entry.rotate_first.unwrap_or(true),
                },
            );
        }

        Ok(parsed)
    }
}
