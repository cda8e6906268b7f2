//! Raster type shared by every compositor, plus decode errors.

use thiserror::Error;

use crate::error::IdPhotoError;

/// Why an uploaded file could not be turned into a raster.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoded image has a zero-sized edge.
    #[error("Unsupported image dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },
}

/// How the camera says the stored pixels must be turned to look upright.
///
/// Values follow the EXIF `Orientation` tag (1-8); anything else reads as
/// upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Upright,
    Mirrored,
    UpsideDown,
    UpsideDownMirrored,
    /// Mirrored, then a quarter turn clockwise.
    QuarterCwMirrored,
    QuarterCw,
    /// Mirrored, then a quarter turn anticlockwise.
    QuarterCcwMirrored,
    QuarterCcw,
}

impl From<u32> for Orientation {
    fn from(tag: u32) -> Self {
        match tag {
            2 => Orientation::Mirrored,
            3 => Orientation::UpsideDown,
            4 => Orientation::UpsideDownMirrored,
            5 => Orientation::QuarterCwMirrored,
            6 => Orientation::QuarterCw,
            7 => Orientation::QuarterCcwMirrored,
            8 => Orientation::QuarterCcw,
            _ => Orientation::Upright,
        }
    }
}

/// An immutable raster image with RGBA pixel data.
///
/// Every compositor returns a fresh `RasterImage`; none of them mutate
/// their input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Bytes per pixel in the RGBA buffer.
    pub const CHANNELS: usize = 4;

    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * Self::CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an image where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * Self::CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a RasterImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Copy into an `image::RgbaImage` for `imageops` processing.
    pub fn to_rgba_image(&self) -> Result<image::RgbaImage, IdPhotoError> {
        self.ensure_well_formed()?;
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| self.malformed())
    }

    /// Get the RGBA value at (x, y). Returns `None` outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * Self::CHANNELS;
        let p = &self.pixels[idx..idx + Self::CHANNELS];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Check that `pixels` holds exactly `width * height` RGBA samples.
    ///
    /// Rasters built from caller-supplied buffers must pass this before any
    /// pixel is indexed.
    pub fn ensure_well_formed(&self) -> Result<(), IdPhotoError> {
        if self.pixels.len() != self.expected_len() {
            return Err(self.malformed());
        }
        Ok(())
    }

    fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * Self::CHANNELS
    }

    fn malformed(&self) -> IdPhotoError {
        IdPhotoError::MalformedRaster {
            width: self.width,
            height: self.height,
            expected: self.expected_len(),
            actual: self.pixels.len(),
        }
    }

    /// True when every pixel has alpha 255.
    pub fn is_opaque(&self) -> bool {
        self.pixels
            .chunks_exact(Self::CHANNELS)
            .all(|p| p[3] == u8::MAX)
    }
}
