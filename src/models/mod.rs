//! Data models for mapping documents
//!
//! A mapping document is a JSON object with a single `sprites` field that maps
//! sprite names to remap rules:
//!
//! ```json
//! {
//!   "sprites": {
//!     "health_mask": {
//!       "src": { "x": 0, "y": 0, "w": 8, "h": 8 },
//!       "dst": { "x": 16, "y": 16, "w": 8, "h": 8 },
//!       "rotate": 90,
//!       "flipH": false,
//!       "flipV": false,
//!       "rotateFirst": true
//!     }
//!   }
//! }
//! ```

mod mapping;

pub use mapping::{
    EntryWarning, MappingDocument, MappingError, ParsedDocument, SpriteEntry, SpriteRect,
};
