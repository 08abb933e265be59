//! Apply command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use glob::{glob, Pattern};
use rayon::prelude::*;

use crate::config::RemapConfig;
use crate::models::MappingDocument;
use crate::output::{generate_output_path, load_rgba, save_png};
use crate::registry::MappingStore;
use crate::remap::{RemapOutcome, Remapper};

use super::{mapping_source, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Remap one image file or every PNG below a directory.
pub fn run_apply(
    input: &Path,
    mapping: &str,
    output: Option<&Path>,
    config: &RemapConfig,
    strict: bool,
) -> ExitCode {
    let (source, name) = mapping_source(mapping, &config.mappings.dir);
    let store = MappingStore::new(source);
    let doc = store.load(&name);
    if doc.is_empty() {
        eprintln!("Warning: mapping '{}' has no usable entries", name);
        if strict {
            return ExitCode::from(EXIT_ERROR);
        }
    }

    let remapper = Remapper::new(config.remap_options());

    if input.is_dir() {
        let Some(out_dir) = output else {
            eprintln!("Error: --output <DIR> is required when the input is a directory");
            return ExitCode::from(EXIT_INVALID_ARGS);
        };
        return run_apply_dir(input, out_dir, &doc, &remapper, strict);
    }

    let out_path = generate_output_path(input, output);
    match remap_file(input, &out_path, &doc, &remapper, strict) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run_apply_dir(
    input: &Path,
    out_dir: &Path,
    doc: &Arc<MappingDocument>,
    remapper: &Remapper,
    strict: bool,
) -> ExitCode {
    let pattern = format!("{}/**/*.png", Pattern::escape(&input.to_string_lossy()));
    let files: Vec<PathBuf> = match glob(&pattern) {
        Ok(paths) => paths.filter_map(Result::ok).filter(|p| !p.starts_with(out_dir)).collect(),
        Err(e) => {
            eprintln!("Error: invalid input path: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if files.is_empty() {
        eprintln!("Error: no PNG files found in '{}'", input.display());
        return ExitCode::from(EXIT_ERROR);
    }

    let failures: Vec<String> = files
        .par_iter()
        .filter_map(|file| {
            let relative = file.strip_prefix(input).unwrap_or(file);
            let out_path = out_dir.join(relative);
            remap_file(file, &out_path, doc, remapper, strict).err()
        })
        .collect();

    for message in &failures {
        eprintln!("Error: {}", message);
    }
    println!("Processed {} file(s), {} failed", files.len(), failures.len());

    if failures.is_empty() {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

fn remap_file(
    input: &Path,
    out_path: &Path,
    doc: &MappingDocument,
    remapper: &Remapper,
    strict: bool,
) -> Result<(), String> {
    let image = load_rgba(input).map_err(|e| format!("'{}': {}", input.display(), e))?;
    let (outcome, report) = remapper.remap_with_report(&image, doc);

    for (name, reason) in report.skipped() {
        eprintln!("Warning: '{}': skipped sprite '{}': {}", input.display(), name, reason);
    }

    let result = match outcome {
        RemapOutcome::Remapped(remapped) => {
            println!(
                "Remapped {} -> {} ({} sprite(s))",
                input.display(),
                out_path.display(),
                report.applied_count()
            );
            remapped
        }
        RemapOutcome::Unchanged if strict => {
            return Err(format!("'{}': no remap performed", input.display()));
        }
        RemapOutcome::Unchanged => {
            println!("Copied {} -> {} (no remap performed)", input.display(), out_path.display());
            image
        }
    };

    save_png(&result, out_path).map_err(|e| format!("'{}': {}", out_path.display(), e))
}
