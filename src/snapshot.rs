use std::sync::Arc;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, RgbaImage};

use crate::error::SnapshotError;
use crate::surface::{Surface, TRANSPARENT};

/// Immutable PNG-encoded copy of the full surface content.
///
/// Cloning is cheap; the encoded bytes are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    bytes: Arc<[u8]>,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("bytes", &format!("<{} bytes>", self.bytes.len()))
            .finish()
    }
}

impl Snapshot {
    /// Encode the current surface content
    pub fn capture(surface: &Surface) -> Result<Self, SnapshotError> {
        let pixels = surface.pixels();
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(
                pixels.as_raw(),
                pixels.width(),
                pixels.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(SnapshotError::Encode)?;
        Ok(Self::from_encoded(bytes))
    }

    /// Wrap already encoded image bytes
    pub fn from_encoded(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self { bytes: bytes.into() }
    }

    /// Decode into pixels, checking the result matches `expected` dimensions
    pub fn decode(&self, expected: (u32, u32)) -> Result<RgbaImage, SnapshotError> {
        let image = image::load_from_memory_with_format(&self.bytes, ImageFormat::Png)
            .map_err(SnapshotError::Decode)?
            .to_rgba8();
        if image.dimensions() != expected {
            return Err(SnapshotError::DimensionMismatch {
                expected,
                found: image.dimensions(),
            });
        }
        Ok(image)
    }
}

/// Identifies one restore so late completions can be told apart from current ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreTicket {
    pub(crate) generation: u64,
    pub(crate) serial: u64,
}

/// A history move waiting for its snapshot to be decoded.
///
/// The request owns everything it needs, so it can be decoded on another
/// thread. Hand the result back with [`crate::Canvas::complete_restore`].
#[derive(Debug, Clone)]
pub struct RestoreRequest {
    pub(crate) ticket: RestoreTicket,
    pub(crate) target_step: usize,
    pub(crate) size: (u32, u32),
    /// `None` restores the blank surface
    pub(crate) snapshot: Option<Snapshot>,
}

impl RestoreRequest {
    /// Decode the target snapshot. This is the only slow part of undo/redo.
    pub fn decode(self) -> DecodedSnapshot {
        let (width, height) = self.size;
        let image = match &self.snapshot {
            Some(snapshot) => snapshot.decode(self.size),
            None => Ok(RgbaImage::from_pixel(width, height, TRANSPARENT)),
        };
        DecodedSnapshot {
            ticket: self.ticket,
            target_step: self.target_step,
            image,
        }
    }
}

/// Completion of a [`RestoreRequest`]
#[derive(Debug)]
pub struct DecodedSnapshot {
    pub(crate) ticket: RestoreTicket,
    pub(crate) target_step: usize,
    pub(crate) image: Result<RgbaImage, SnapshotError>,
}
