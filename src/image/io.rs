//! I/O helpers for RGB buffers and JSON.
//!
//! - `load_rgb_image`: decode PNG/JPEG/TIFF/BMP/GIF into a [`PixelBuffer`]
//!   (alpha is dropped).
//! - `save_image`: encode a buffer as PNG, JPEG or a single-page PDF.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::pdf;
use super::rgb::PixelBuffer;
use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::{ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// JPEG quality used for both `.jpg` output and the PDF image stream.
pub const JPEG_QUALITY: u8 = 95;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
}

impl OutputFormat {
    /// Infer the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pdf => "PDF",
            Self::Png => "PNG",
            Self::Jpeg => "JPG",
        })
    }
}

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<PixelBuffer, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    PixelBuffer::new(width, height, img.into_raw())
        .map_err(|e| format!("Failed to load {}: {e}", path.display()))
}

/// Encode `buffer` to `path`. `dpi` is recorded as JPEG density and used to
/// size the PDF page.
pub fn save_image(
    buffer: &PixelBuffer,
    path: &Path,
    format: OutputFormat,
    dpi: u32,
) -> Result<(), String> {
    ensure_parent_dir(path)?;
    match format {
        OutputFormat::Png => to_rgb_image(buffer)?
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| format!("Failed to save {}: {e}", path.display())),
        OutputFormat::Jpeg => {
            let jpeg = encode_jpeg(buffer, dpi)?;
            fs::write(path, jpeg).map_err(|e| format!("Failed to write {}: {e}", path.display()))
        }
        OutputFormat::Pdf => {
            let jpeg = encode_jpeg(buffer, dpi)?;
            pdf::write_single_page(path, &jpeg, buffer.width(), buffer.height(), dpi)
        }
    }
}

/// Baseline JPEG bytes at [`JPEG_QUALITY`] with the density set to `dpi`.
pub fn encode_jpeg(buffer: &PixelBuffer, dpi: u32) -> Result<Vec<u8>, String> {
    let img = to_rgb_image(buffer)?;
    let mut out = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
        encoder.set_pixel_density(PixelDensity::dpi(dpi.min(u16::MAX as u32) as u16));
        encoder
            .encode_image(&img)
            .map_err(|e| format!("Failed to encode JPEG: {e}"))?;
    }
    Ok(out)
}

fn to_rgb_image(buffer: &PixelBuffer) -> Result<RgbImage, String> {
    RgbImage::from_raw(
        buffer.width() as u32,
        buffer.height() as u32,
        buffer.as_bytes().to_vec(),
    )
    .ok_or_else(|| "Failed to create image buffer".to_string())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
