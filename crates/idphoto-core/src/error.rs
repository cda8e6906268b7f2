//! Error taxonomy for the compositing pipeline.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Errors surfaced by the compositors and the export pipeline.
#[derive(Debug, Error)]
pub enum IdPhotoError {
    /// The uploaded bytes could not be decoded as an image.
    #[error("Could not read image: {0}")]
    DecodeFailure(#[from] DecodeError),

    /// Crop rectangle does not lie inside the rotated bounding box.
    #[error(
        "Crop region {width}x{height} at ({x}, {y}) exceeds bounds {bounds_width}x{bounds_height}"
    )]
    InvalidCropRegion {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        bounds_width: u32,
        bounds_height: u32,
    },

    /// Rotation angle was NaN or infinite.
    #[error("Invalid rotation angle: {degrees}")]
    InvalidRotation { degrees: f64 },

    /// Pixel buffer length does not match the stated dimensions.
    #[error("Malformed {width}x{height} raster: expected {expected} bytes, got {actual}")]
    MalformedRaster {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Export resolution outside the supported range.
    #[error("Unsupported resolution {ppi} PPI (expected {min}-{max})")]
    InvalidResolution { ppi: u32, min: u32, max: u32 },

    /// An output surface of the requested size could not be allocated.
    #[error("Cannot allocate a {width}x{height} drawing surface")]
    CompositingUnavailable { width: u32, height: u32 },

    /// A physical tile size was zero, negative or not a number.
    #[error("Invalid physical size {width_mm}x{height_mm} mm")]
    InvalidPhysicalSize { width_mm: f64, height_mm: f64 },

    /// The external segmentation model failed.
    #[error("Background removal failed: {0}")]
    SegmentationFailure(String),

    /// The finished raster could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// No preset with the given id exists in the catalog.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

impl IdPhotoError {
    /// Whether the user can recover by retrying or choosing another photo.
    ///
    /// The remaining variants mean the caller broke a contract (bad crop,
    /// angle, buffer, size, resolution or preset id); retrying the same
    /// request cannot succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            IdPhotoError::DecodeFailure(_)
                | IdPhotoError::CompositingUnavailable { .. }
                | IdPhotoError::SegmentationFailure(_)
                | IdPhotoError::Encode(_)
        )
    }
}
