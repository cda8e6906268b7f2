//! Rotate-crop compositing.
//!
//! Turns the crop widget's final snapshot into the finished ID photo:
//! the source is rotated about its centre onto its bounding box, then the
//! crop rectangle (in bounding-box pixels) is cut out of that canvas.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise
//! - Crop coordinates are pixels relative to the rotated bounding box
//! - Origin is top-left corner

mod crop;
mod rotation;

pub use crop::{extract_region, CropRect};
pub use rotation::{render_rotated, rotated_canvas_size, Flip};

use tracing::debug;

use crate::decode::RasterImage;
use crate::error::IdPhotoError;
use crate::geometry::check_rotation;

/// Rotate `source` and cut `crop` out of the rotated bounding box.
///
/// The output is exactly `crop.width` x `crop.height`. Identical inputs
/// always produce identical pixels.
///
/// # Errors
///
/// - `CompositingUnavailable` if `source` has no pixels
/// - `InvalidRotation` if the angle is NaN or infinite
/// - `MalformedRaster` if the source buffer does not match its dimensions
/// - `InvalidCropRegion` if `crop` is empty or leaves the bounding box
pub fn composite(
    source: &RasterImage,
    rotation_degrees: f64,
    crop: &CropRect,
) -> Result<RasterImage, IdPhotoError> {
    composite_with_flip(source, rotation_degrees, crop, Flip::NONE)
}

/// [`composite`] with an optional mirror applied to the source first.
pub fn composite_with_flip(
    source: &RasterImage,
    rotation_degrees: f64,
    crop: &CropRect,
    flip: Flip,
) -> Result<RasterImage, IdPhotoError> {
    if source.is_empty() {
        return Err(IdPhotoError::CompositingUnavailable {
            width: source.width,
            height: source.height,
        });
    }
    check_rotation(rotation_degrees)?;
    source.ensure_well_formed()?;

    let (bounds_w, bounds_h) = rotated_canvas_size(source, rotation_degrees);
    crop.validate(bounds_w, bounds_h)?;

    debug!(
        src_w = source.width,
        src_h = source.height,
        rotation_degrees,
        bounds_w,
        bounds_h,
        ?crop,
        flipped = !flip.is_none(),
        "Compositing rotated crop"
    );

    rotation::render_window(source, rotation_degrees, flip, crop)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 5 % 256) as u8, (y * 7 % 256) as u8, 64, 255]);
            }
        }
        RasterImage::new(width, height, pixels)
    }

    #[test]
    fn test_unrotated_crop_copies_pixels() {
        let img = test_image(60, 40);
        let crop = CropRect::new(10, 5, 20, 30);
        let result = composite(&img, 0.0, &crop).unwrap();

        assert_eq!((result.width, result.height), (20, 30));
        assert_eq!(result, extract_region(&img, &crop).unwrap());
    }

    #[test]
    fn test_quarter_turn_crop_uses_swapped_bounds() {
        let img = test_image(60, 40);
        // 40 wide, 60 tall after a quarter turn
        let crop = CropRect::new(0, 0, 40, 60);
        let result = composite(&img, 90.0, &crop).unwrap();
        assert_eq!((result.width, result.height), (40, 60));

        // Would fit the unrotated image but not the rotated one
        let too_wide = CropRect::new(0, 0, 60, 40);
        assert!(matches!(
            composite(&img, 90.0, &too_wide),
            Err(IdPhotoError::InvalidCropRegion { .. })
        ));
    }

    #[test]
    fn test_rotated_crop_dimensions() {
        let img = test_image(80, 60);
        let (bw, bh) = rotated_canvas_size(&img, 12.5);
        let crop = CropRect::new(bw / 4, bh / 4, bw / 2, bh / 2);
        let result = composite(&img, 12.5, &crop).unwrap();
        assert_eq!((result.width, result.height), (bw / 2, bh / 2));
    }

    #[test]
    fn test_crop_outside_rotated_bounds_fails() {
        let img = test_image(80, 60);
        let (bw, bh) = rotated_canvas_size(&img, -20.0);
        let crop = CropRect::new(1, 0, bw, bh);
        assert!(composite(&img, -20.0, &crop).is_err());
    }

    #[test]
    fn test_non_finite_rotation_fails() {
        let img = RasterImage::filled(10, 10, [40, 40, 40, 255]);
        let crop = CropRect::new(0, 0, 1, 1);
        for angle in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                composite(&img, angle, &crop),
                Err(IdPhotoError::InvalidRotation { .. })
            ));
        }
    }

    #[test]
    fn test_short_buffer_fails_instead_of_blank_output() {
        let img = RasterImage {
            width: 10,
            height: 10,
            pixels: vec![0; 4],
        };
        let crop = CropRect::new(0, 0, 5, 5);
        for angle in [90.0, 30.0] {
            assert!(matches!(
                composite(&img, angle, &crop),
                Err(IdPhotoError::MalformedRaster { .. })
            ));
        }
    }

    #[test]
    fn test_empty_source_is_unavailable() {
        let img = RasterImage::new(0, 0, vec![]);
        let result = composite(&img, 0.0, &CropRect::new(0, 0, 1, 1));
        assert!(matches!(
            result,
            Err(IdPhotoError::CompositingUnavailable { .. })
        ));
    }

    #[test]
    fn test_central_crop_of_rotated_image_is_opaque() {
        let img = test_image(100, 100);
        let (bw, bh) = rotated_canvas_size(&img, 30.0);
        let crop = CropRect::new(bw / 2 - 20, bh / 2 - 20, 40, 40);
        let result = composite(&img, 30.0, &crop).unwrap();
        assert!(result.is_opaque());
    }

    #[test]
    fn test_flip_changes_output() {
        let img = test_image(30, 30);
        let crop = CropRect::full(30, 30);
        let plain = composite(&img, 0.0, &crop).unwrap();
        let mirrored = composite_with_flip(
            &img,
            0.0,
            &crop,
            Flip {
                horizontal: true,
                vertical: false,
            },
        )
        .unwrap();

        assert_ne!(plain, mirrored);
        assert_eq!(mirrored.pixel(0, 0), plain.pixel(29, 0));
    }
}
