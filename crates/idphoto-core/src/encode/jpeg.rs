//! JPEG encoding for exported photos and print sheets.
//!
//! JPEG has no alpha channel, so RGBA rasters are flattened onto the export
//! backdrop first. The default quality (95) keeps fine detail such as hair
//! edges that ID-photo checkers look at.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::background::{flatten_on_background, Backdrop};
use crate::decode::RasterImage;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode packed RGB8 pixels (row-major) as a baseline JPEG.
///
/// `quality` is clamped to 1-100.
pub fn encode_jpeg(
    rgb: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: rgb.len(),
        });
    }

    let mut out = Vec::with_capacity(expected / 8);
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .write_image(rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out)
}

/// Encode an RGBA raster as JPEG, flattening any transparency onto
/// `backdrop` first.
pub fn encode_raster_jpeg(
    image: &RasterImage,
    quality: u8,
    backdrop: Backdrop,
) -> Result<Vec<u8>, EncodeError> {
    let flat = if image.is_opaque() {
        None
    } else {
        Some(flatten_on_background(image, backdrop).map_err(|_| {
            EncodeError::InvalidDimensions {
                width: image.width,
                height: image.height,
            }
        })?)
    };
    let source = flat.as_ref().unwrap_or(image);

    let rgb: Vec<u8> = source
        .pixels
        .chunks_exact(RasterImage::CHANNELS)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();

    encode_jpeg(&rgb, source.width, source.height, quality)
}
