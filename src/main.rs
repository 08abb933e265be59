//! Atlas-remap - Command-line tool for remapping sprite-atlas textures

use std::process::ExitCode;

use atlas_remap::cli;

fn main() -> ExitCode {
    cli::run()
}
