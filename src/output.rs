//! PNG input/output and file path generation

use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for image file operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image decoding or encoding error
    Image(image::ImageError),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Load an image file as RGBA8, whatever its stored color type.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, OutputError> {
    Ok(image::open(path)?.to_rgba8())
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    Ok(())
}

/// Generate the output path for a remapped image.
///
/// - No output given: `{input_stem}_remapped.png` next to the input
/// - Output ending in `/` or naming an existing directory: `{dir}/{input_name}.png`
/// - Otherwise: the output path as given
pub fn generate_output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");

    match output {
        None => {
            let parent = input.parent().unwrap_or(Path::new(""));
            parent.join(format!("{}_remapped.png", stem))
        }
        Some(out) => {
            let is_dir = out.to_string_lossy().ends_with('/') || out.is_dir();
            if is_dir {
                out.join(format!("{}.png", stem))
            } else {
                out.to_path_buf()
            }
        }
    }
}
