//! Explain command implementation
//!
//! Lists a mapping document's entries and, given a texture size, which of them
//! would be applied, scaled, skipped, or overwritten by a later entry.

use std::process::ExitCode;

use serde::Serialize;

use crate::config::RemapConfig;
use crate::models::{MappingDocument, SpriteRect};
use crate::rect::{Origin, PixelRect};
use crate::registry::MappingStore;
use crate::remap::{resolve_entry, ResolvedEntry};
use crate::transforms::{explain_transform, SpriteTransform};

use super::{mapping_source, parse_size, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

#[derive(Debug, Serialize)]
struct ExplainedEntry {
    name: String,
    src: SpriteRect,
    dst: SpriteRect,
    transform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    check: Option<EntryCheck>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum EntryCheck {
    Applied {
        src: PixelRect,
        dst: PixelRect,
        scaled: bool,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        overwritten_by: Vec<String>,
    },
    Skipped {
        reason: String,
    },
}

/// Explain a mapping document.
pub fn run_explain(
    mapping: &str,
    size: Option<&str>,
    config: &RemapConfig,
    json: bool,
) -> ExitCode {
    let size = match size.map(|s| (s, parse_size(s))) {
        None => None,
        Some((_, Some(size))) => Some(size),
        Some((raw, None)) => {
            eprintln!("Error: invalid --size '{}' (expected WxH, e.g. 256x128)", raw);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let (source, name) = mapping_source(mapping, &config.mappings.dir);
    let store = MappingStore::new(source);
    let doc = match store.try_load(&name) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let entries = explain_document(&doc, size, config.remap.rect_origin);

    if json {
        match serde_json::to_string_pretty(&entries) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print_text(&name, &entries);
    }

    ExitCode::from(EXIT_SUCCESS)
}

fn explain_document(
    doc: &MappingDocument,
    size: Option<(u32, u32)>,
    rect_origin: Origin,
) -> Vec<ExplainedEntry> {
    let resolved: Vec<Option<Result<ResolvedEntry, String>>> = doc
        .iter()
        .map(|(_, entry)| {
            size.map(|(w, h)| resolve_entry(entry, w, h, rect_origin).map_err(|e| e.to_string()))
        })
        .collect();
    let names: Vec<&str> = doc.names().collect();

    doc.iter()
        .enumerate()
        .map(|(i, (name, entry))| {
            let check = resolved[i].as_ref().map(|r| match r {
                Ok(res) => EntryCheck::Applied {
                    src: res.src,
                    dst: res.dst,
                    scaled: res.needs_scaling(),
                    overwritten_by: later_overlaps(&resolved, &names, i, &res.dst),
                },
                Err(reason) => EntryCheck::Skipped { reason: reason.clone() },
            });
            ExplainedEntry {
                name: name.to_string(),
                src: entry.src,
                dst: entry.destination(),
                transform: explain_transform(&SpriteTransform::from(entry)),
                check,
            }
        })
        .collect()
}

/// Names of applied entries after `index` whose destination overlaps `dst`.
fn later_overlaps(
    resolved: &[Option<Result<ResolvedEntry, String>>],
    names: &[&str],
    index: usize,
    dst: &PixelRect,
) -> Vec<String> {
    resolved
        .iter()
        .enumerate()
        .skip(index + 1)
        .filter_map(|(j, r)| match r {
            Some(Ok(other)) if other.dst.intersects(dst) => Some(names[j].to_string()),
            _ => None,
        })
        .collect()
}

fn format_rect(rect: &SpriteRect) -> String {
    format!("{}x{} at ({}, {})", rect.w, rect.h, rect.x, rect.y)
}

fn print_text(name: &str, entries: &[ExplainedEntry]) {
    println!("Mapping: {} ({} sprite(s))", name, entries.len());
    for entry in entries {
        println!();
        println!("  {}", entry.name);
        println!("    src:       {}", format_rect(&entry.src));
        println!("    dst:       {}", format_rect(&entry.dst));
        println!("    transform: {}", entry.transform);
        match &entry.check {
            None => {}
            Some(EntryCheck::Applied { scaled, overwritten_by, .. }) => {
                let note = if *scaled { " (scaled)" } else { "" };
                println!("    status:    applied{}", note);
                if !overwritten_by.is_empty() {
                    println!("    warning:   overwritten by {}", overwritten_by.join(", "));
                }
            }
            Some(EntryCheck::Skipped { reason }) => {
                println!("    status:    skipped ({})", reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpriteEntry;

    fn doc() -> MappingDocument {
        MappingDocument::new()
            .with_entry(
                "a",
                SpriteEntry::new(SpriteRect::new(0.0, 0.0, 4.0, 4.0))
                    .with_dst(SpriteRect::new(8.0, 8.0, 4.0, 4.0)),
            )
            .with_entry(
                "b",
                SpriteEntry::new(SpriteRect::new(0.0, 0.0, 2.0, 2.0))
                    .with_dst(SpriteRect::new(10.0, 10.0, 4.0, 4.0)),
            )
            .with_entry("c", SpriteEntry::new(SpriteRect::new(30.0, 0.0, 4.0, 4.0)))
    }

    #[test]
    fn test_explain_without_size() {
        let entries = explain_document(&doc(), None, Origin::TopLeft);
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.check.is_none()));
        assert_eq!(entries[2].dst, entries[2].src);
        assert_eq!(entries[0].transform, "copy");
    }

    #[test]
    fn test_explain_with_size() {
        let entries = explain_document(&doc(), Some((16, 16)), Origin::TopLeft);

        match &entries[0].check {
            Some(EntryCheck::Applied { scaled, overwritten_by, .. }) => {
                assert!(!scaled);
                assert_eq!(overwritten_by, &vec!["b".to_string()]);
            }
            other => panic!("unexpected {:?}", other),
        }
        match &entries[1].check {
            Some(EntryCheck::Applied { scaled, overwritten_by, .. }) => {
                assert!(scaled);
                assert!(overwritten_by.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(&entries[2].check, Some(EntryCheck::Skipped { .. })));
    }

    #[test]
    fn test_explain_json_shape() {
        let entries = explain_document(&doc(), Some((16, 16)), Origin::TopLeft);
        let value = serde_json::to_value(&entries).unwrap();
        assert_eq!(value[0]["check"]["status"], "applied");
        assert_eq!(value[2]["check"]["status"], "skipped");
        assert_eq!(value[1]["dst"]["w"], 4.0);
    }
}
