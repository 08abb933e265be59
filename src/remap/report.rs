//! Per-entry results of a remap pass

use serde::Serialize;
use thiserror::Error;

use crate::rect::RectError;

/// Why an entry was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("source {0}")]
    Source(#[serde(serialize_with = "serialize_display")] RectError),
    #[error("destination {0}")]
    Destination(#[serde(serialize_with = "serialize_display")] RectError),
}

fn serialize_display<S: serde::Serializer>(
    value: &RectError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// What happened to one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    /// Written to the output; `scaled` is set when the block was resized.
    Applied { name: String, scaled: bool },
    Skipped { name: String, reason: SkipReason },
}

impl EntryOutcome {
    pub fn name(&self) -> &str {
        match self {
            EntryOutcome::Applied { name, .. } | EntryOutcome::Skipped { name, .. } => name,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, EntryOutcome::Applied { .. })
    }
}

/// Outcomes of every entry, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemapReport {
    pub entries: Vec<EntryOutcome>,
}

impl RemapReport {
    pub fn applied_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_applied()).count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.entries.iter().filter_map(|e| match e {
            EntryOutcome::Skipped { name, reason } => Some((name.as_str(), reason)),
            EntryOutcome::Applied { .. } => None,
        })
    }

    pub(crate) fn push(&mut self, outcome: EntryOutcome) {
        self.entries.push(outcome);
    }
}
