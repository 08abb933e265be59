//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod apply;
mod explain;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, RemapConfig};
use crate::rect::Origin;
use crate::registry::DirectorySource;

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Atlas-remap - rebuild sprite-atlas textures from a JSON mapping
#[derive(Parser)]
#[command(name = "atlas-remap")]
#[command(about = "Atlas-remap - rebuild sprite-atlas textures from a JSON mapping document")]
#[command(version)]
pub struct Cli {
    /// Path to remap.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remap a PNG texture (or every PNG under a directory)
    Apply {
        /// Input PNG file or directory
        input: PathBuf,

        /// Mapping document name (looked up in the mappings directory) or path
        #[arg(short, long)]
        mapping: String,

        /// Directory containing mapping documents (overrides remap.toml)
        #[arg(long)]
        mappings_dir: Option<PathBuf>,

        /// Output file or directory.
        /// If omitted: {input}_remapped.png
        /// If directory (ends with /): dir/{input}.png
        /// Required when the input is a directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Origin of rects in the mapping document
        #[arg(long, value_enum)]
        rect_origin: Option<Origin>,

        /// Row order of the image data
        #[arg(long, value_enum)]
        pixel_origin: Option<Origin>,

        /// Fail instead of copying the input when no remap is performed
        #[arg(long)]
        strict: bool,
    },

    /// Describe a mapping document's entries
    Explain {
        /// Mapping document name (looked up in the mappings directory) or path
        #[arg(short, long)]
        mapping: String,

        /// Directory containing mapping documents (overrides remap.toml)
        #[arg(long)]
        mappings_dir: Option<PathBuf>,

        /// Check entries against a texture size (e.g. "256x128")
        #[arg(long, value_name = "WxH")]
        size: Option<String>,

        /// Origin of rects in the mapping document
        #[arg(long, value_enum)]
        rect_origin: Option<Origin>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Install the tracing subscriber; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .try_init();
}

/// Load remap.toml (explicit or discovered) and apply CLI overrides.
fn resolve_config(path: Option<&Path>, overrides: &CliOverrides) -> Result<RemapConfig, ExitCode> {
    match load_config(path) {
        Ok(mut config) => {
            merge_cli_overrides(&mut config, overrides);
            Ok(config)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Turn a `--mapping` argument into a source and document name.
///
/// An existing file is read directly; anything else is a name in the mappings
/// directory.
pub(crate) fn mapping_source(mapping: &str, mappings_dir: &Path) -> (DirectorySource, String) {
    let path = Path::new(mapping);
    if path.is_file() {
        let dir = path.parent().unwrap_or(Path::new("")).to_path_buf();
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        if let Some(name) = name {
            return (DirectorySource::new(dir), name);
        }
    }
    (DirectorySource::new(mappings_dir), mapping.to_string())
}

/// Parse a size string like "64x32".
pub(crate) fn parse_size(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once(['x', 'X'])?;
    let w: u32 = w.trim().parse().ok()?;
    let h: u32 = h.trim().parse().ok()?;
    if w == 0 || h == 0 {
        return None;
    }
    Some((w, h))
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Apply {
            input,
            mapping,
            mappings_dir,
            output,
            rect_origin,
            pixel_origin,
            strict,
        } => {
            let overrides = CliOverrides { mappings_dir, rect_origin, pixel_origin };
            let config = match resolve_config(cli.config.as_deref(), &overrides) {
                Ok(c) => c,
                Err(code) => return code,
            };
            apply::run_apply(&input, &mapping, output.as_deref(), &config, strict)
        }
        Commands::Explain { mapping, mappings_dir, size, rect_origin, json } => {
            let overrides = CliOverrides { mappings_dir, rect_origin, pixel_origin: None };
            let config = match resolve_config(cli.config.as_deref(), &overrides) {
                Ok(c) => c,
                Err(code) => return code,
            };
            explain::run_explain(&mapping, size.as_deref(), &config, json)
        }
    }
}
