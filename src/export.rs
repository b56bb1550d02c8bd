use std::fs;
use std::path::PathBuf;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgba, RgbaImage};

use crate::error::ExportError;
use crate::surface::Surface;

/// Opaque white used to flatten transparency for formats without alpha
const FLATTEN_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Target encodings for an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Alpha-preserving; the surface is written verbatim
    Png,
    /// No alpha; the surface is composited over white first
    Jpeg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
        }
    }
}

/// An encoded image ready to be handed to a download sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Encode the surface as PNG, keeping transparency
pub fn export_png(surface: &Surface, file_stem: &str) -> Result<ExportedImage, ExportError> {
    let pixels = surface.pixels();
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            pixels.as_raw(),
            pixels.width(),
            pixels.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|source| ExportError::Encode { format: "PNG", source })?;
    Ok(finish(ExportFormat::Png, file_stem, bytes))
}

/// Encode the surface as JPEG over an opaque white background.
///
/// A scratch image of the same size is filled white and the surface is
/// blended on top, so unpainted pixels come out white instead of black.
pub fn export_jpeg(
    surface: &Surface,
    file_stem: &str,
    quality: u8,
) -> Result<ExportedImage, ExportError> {
    let flattened = flatten_onto_white(surface);
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
        .write_image(
            flattened.as_raw(),
            flattened.width(),
            flattened.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|source| ExportError::Encode { format: "JPEG", source })?;
    Ok(finish(ExportFormat::Jpeg, file_stem, bytes))
}

/// Composite the surface over opaque white and drop the alpha channel
pub(crate) fn flatten_onto_white(surface: &Surface) -> image::RgbImage {
    let (width, height) = surface.size();
    let mut scratch = RgbaImage::from_pixel(width, height, FLATTEN_BACKGROUND);
    image::imageops::overlay(&mut scratch, surface.pixels(), 0, 0);
    DynamicImage::ImageRgba8(scratch).to_rgb8()
}

fn finish(format: ExportFormat, file_stem: &str, bytes: Vec<u8>) -> ExportedImage {
    let file_name = format!("{}.{}", file_stem, format.extension());
    log::info!("Exported {} ({} bytes)", file_name, bytes.len());
    ExportedImage {
        file_name,
        mime_type: format.mime_type(),
        bytes,
    }
}

/// Host capability that receives finished exports, e.g. a browser download
/// or a file on disk.
pub trait DownloadSink {
    fn deliver(&mut self, image: &ExportedImage) -> Result<(), ExportError>;
}

/// Writes each export into a directory, replacing a file of the same name
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, image: &ExportedImage) -> Result<(), ExportError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&image.file_name);
        fs::write(&path, &image.bytes)?;
        log::info!("Saved {}", path.display());
        Ok(())
    }
}
