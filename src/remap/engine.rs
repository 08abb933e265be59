//! The remap pipeline
//!
//! For each entry: resolve rects, extract the source block from the input,
//! rotate/flip it, resize it to the destination, clear the destination and
//! write the block. Blocks are always read from the untouched input, so one
//! entry's output never feeds another entry.

use image::RgbaImage;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{MappingDocument, SpriteEntry};
use crate::rect::{convert_rows, Origin, PixelRect};
use crate::transforms::{
    apply_sprite_transform, clear_region, extract_region, scale_nearest, write_region,
    SpriteTransform,
};

use super::report::{EntryOutcome, RemapReport, SkipReason};

/// Unexpected failure inside a remap pass.
///
/// These are caught by [`Remapper::remap`] and reported as
/// [`RemapOutcome::Unchanged`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RemapError {
    #[error("pixel buffer holds {len} bytes, expected {expected} for {width}x{height}")]
    BufferSize { width: u32, height: u32, len: usize, expected: u64 },

    #[error("block for '{entry}' is {actual:?}, destination is {expected:?}")]
    BlockSize { entry: String, actual: (u32, u32), expected: (u32, u32) },

    #[error("output is {actual:?}, input was {expected:?}")]
    OutputSize { actual: (u32, u32), expected: (u32, u32) },
}

/// Result of a remap call.
#[derive(Debug, Clone, PartialEq)]
pub enum RemapOutcome {
    /// A new texture with the same dimensions as the input
    Remapped(RgbaImage),
    /// Nothing was done; keep using the original texture
    Unchanged,
}

impl RemapOutcome {
    pub fn is_remapped(&self) -> bool {
        matches!(self, RemapOutcome::Remapped(_))
    }

    pub fn into_image(self) -> Option<RgbaImage> {
        match self {
            RemapOutcome::Remapped(image) => Some(image),
            RemapOutcome::Unchanged => None,
        }
    }

    /// The remapped texture, or `original` when nothing was done.
    pub fn or_original(self, original: RgbaImage) -> RgbaImage {
        self.into_image().unwrap_or(original)
    }
}

/// Coordinate conventions at the engine boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapOptions {
    /// Origin of rects in mapping documents
    pub rect_origin: Origin,
    /// Row order of the pixel buffers passed in and returned
    pub pixel_origin: Origin,
}

impl Default for RemapOptions {
    fn default() -> Self {
        Self { rect_origin: Origin::BottomLeft, pixel_origin: Origin::TopLeft }
    }
}

/// An entry with its rects rounded, converted and bounds-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub src: PixelRect,
    pub dst: PixelRect,
    pub transform: SpriteTransform,
}

impl ResolvedEntry {
    /// Size of the source block after rotation.
    pub fn transformed_size(&self) -> (u32, u32) {
        let (_, _, w, h) = self.src.as_u32();
        self.transform.output_size(w, h)
    }

    pub fn destination_size(&self) -> (u32, u32) {
        let (_, _, w, h) = self.dst.as_u32();
        (w, h)
    }

    pub fn needs_scaling(&self) -> bool {
        self.transformed_size() != self.destination_size()
    }
}

/// Resolve an entry against a `width`×`height` texture.
pub fn resolve_entry(
    entry: &SpriteEntry,
    width: u32,
    height: u32,
    rect_origin: Origin,
) -> Result<ResolvedEntry, SkipReason> {
    let src = PixelRect::from_sprite_rect(&entry.src, height, rect_origin);
    let dst = PixelRect::from_sprite_rect(&entry.destination(), height, rect_origin);

    src.check_bounds(width, height).map_err(SkipReason::Source)?;
    dst.check_bounds(width, height).map_err(SkipReason::Destination)?;

    Ok(ResolvedEntry { src, dst, transform: SpriteTransform::from(entry) })
}

/// Applies mapping documents to textures.
#[derive(Debug, Clone, Copy, Default)]
pub struct Remapper {
    options: RemapOptions,
}

impl Remapper {
    pub fn new(options: RemapOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> RemapOptions {
        self.options
    }

    /// Remap `pixels` according to `doc`.
    ///
    /// An empty document yields [`RemapOutcome::Unchanged`]. The input is
    /// never modified.
    pub fn remap(&self, pixels: &RgbaImage, doc: &MappingDocument) -> RemapOutcome {
        self.remap_with_report(pixels, doc).0
    }

    /// [`remap`](Self::remap), also returning what happened to each entry.
    pub fn remap_with_report(
        &self,
        pixels: &RgbaImage,
        doc: &MappingDocument,
    ) -> (RemapOutcome, RemapReport) {
        let mut report = RemapReport::default();
        if doc.is_empty() {
            return (RemapOutcome::Unchanged, report);
        }

        match self.try_remap(pixels, doc, &mut report) {
            Ok(image) => {
                debug!(
                    applied = report.applied_count(),
                    skipped = report.entries.len() - report.applied_count(),
                    "remapped texture"
                );
                (RemapOutcome::Remapped(image), report)
            }
            Err(e) => {
                warn!("remap failed, keeping original texture: {}", e);
                (RemapOutcome::Unchanged, report)
            }
        }
    }

    /// Remap a raw RGBA8 buffer of `width`×`height` pixels.
    ///
    /// A buffer whose length does not match the dimensions yields
    /// [`RemapOutcome::Unchanged`].
    pub fn remap_raw(
        &self,
        width: u32,
        height: u32,
        bytes: &[u8],
        doc: &MappingDocument,
    ) -> RemapOutcome {
        if doc.is_empty() {
            return RemapOutcome::Unchanged;
        }

        let expected = u64::from(width) * u64::from(height) * 4;
        let image = if bytes.len() as u64 == expected {
            RgbaImage::from_raw(width, height, bytes.to_vec())
        } else {
            None
        };
        match image {
            Some(image) => self.remap(&image, doc),
            None => {
                let e = RemapError::BufferSize { width, height, len: bytes.len(), expected };
                warn!("remap failed, keeping original texture: {}", e);
                RemapOutcome::Unchanged
            }
        }
    }

    fn try_remap(
        &self,
        pixels: &RgbaImage,
        doc: &MappingDocument,
        report: &mut RemapReport,
    ) -> Result<RgbaImage, RemapError> {
        let (width, height) = pixels.dimensions();
        let input = convert_rows(pixels.clone(), self.options.pixel_origin);
        let mut output = input.clone();

        for (name, entry) in doc.iter() {
            let resolved = match resolve_entry(entry, width, height, self.options.rect_origin) {
                Ok(resolved) => resolved,
                Err(reason) => {
                    debug!(sprite = name, "skipping entry: {}", reason);
                    report.push(EntryOutcome::Skipped { name: name.to_string(), reason });
                    continue;
                }
            };

            let block = extract_region(&input, &resolved.src);
            let block = apply_sprite_transform(&block, &resolved.transform);

            let (dst_w, dst_h) = resolved.destination_size();
            let scaled = block.dimensions() != (dst_w, dst_h);
            let block = if scaled { scale_nearest(&block, dst_w, dst_h) } else { block };
            if block.dimensions() != (dst_w, dst_h) {
                return Err(RemapError::BlockSize {
                    entry: name.to_string(),
                    actual: block.dimensions(),
                    expected: (dst_w, dst_h),
                });
            }

            clear_region(&mut output, &resolved.dst);
            write_region(&mut output, &resolved.dst, &block);
            report.push(EntryOutcome::Applied { name: name.to_string(), scaled });
        }

        if output.dimensions() != (width, height) {
            return Err(RemapError::OutputSize {
                actual: output.dimensions(),
                expected: (width, height),
            });
        }
        Ok(convert_rows(output, self.options.pixel_origin))
    }
}
