//! Pixel-space crop rectangles and region extraction.
//!
//! Crop rectangles arrive from the crop widget already expressed in the
//! coordinate space of the rotated bounding box, with zoom and pan baked in.
//! They are validated here and never clamped: an out-of-bounds rectangle is
//! a caller bug and is reported as [`IdPhotoError::InvalidCropRegion`].
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left corner of the rotated bounding box
//! - `x + width <= bounds_width`, `y + height <= bounds_height`

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decode::RasterImage;
use crate::error::IdPhotoError;

/// Axis-aligned crop region in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole of a `width` x `height` area.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Check that the rectangle is non-empty and fits inside the bounds.
    pub fn validate(&self, bounds_width: u32, bounds_height: u32) -> Result<(), IdPhotoError> {
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);

        let fits = self.width > 0
            && self.height > 0
            && right.is_some_and(|r| r <= bounds_width)
            && bottom.is_some_and(|b| b <= bounds_height);

        if fits {
            Ok(())
        } else {
            warn!(crop = ?self, bounds_width, bounds_height, "Rejected crop region");
            Err(IdPhotoError::InvalidCropRegion {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                bounds_width,
                bounds_height,
            })
        }
    }
}

/// Copy the pixels under `crop` into a new image of exactly
/// `crop.width` x `crop.height`.
///
/// # Errors
///
/// Returns `InvalidCropRegion` if the rectangle is empty or leaves the image.
pub fn extract_region(image: &RasterImage, crop: &CropRect) -> Result<RasterImage, IdPhotoError> {
    crop.validate(image.width, image.height)?;

    // Fast path: full crop returns a clone
    if *crop == CropRect::full(image.width, image.height) {
        return Ok(image.clone());
    }

    let channels = RasterImage::CHANNELS;
    let row_bytes = crop.width as usize * channels;
    let mut output = Vec::with_capacity(row_bytes * crop.height as usize);

    // Copy pixel data row by row
    for y in crop.y..crop.y + crop.height {
        let start = (y as usize * image.width as usize + crop.x as usize) * channels;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Ok(RasterImage::new(crop.width, crop.height, output))
}
