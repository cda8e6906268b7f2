//! Flattening transparent photos onto a solid backdrop.
//!
//! Background removal is a two-step affair: an external segmentation model
//! makes the background transparent, then [`flatten_on_background`] puts the
//! cut-out on an opaque colour (white by default) so the photo meets
//! ID-document requirements and can be saved as JPEG.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::decode::RasterImage;
use crate::error::IdPhotoError;

/// Opaque RGB backdrop colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backdrop(pub [u8; 3]);

impl Backdrop {
    pub const WHITE: Backdrop = Backdrop([255, 255, 255]);
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Failure reported by a segmentation backend.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SegmentationError(pub String);

/// An image-segmentation model that makes background pixels transparent.
///
/// Implementations may wrap a local model, a web worker or a remote service.
/// They must leave the input untouched and return a new image of the same
/// size whose alpha channel masks out the background.
pub trait Segmenter {
    fn segment(&self, image: &RasterImage) -> Result<RasterImage, SegmentationError>;
}

/// Composite `image` over an opaque `backdrop` using source-over blending.
///
/// Each output pixel is `a * rgb + (1 - a) * backdrop`, with alpha 255.
///
/// # Errors
///
/// - `CompositingUnavailable` for a zero-sized input
/// - `MalformedRaster` if the buffer does not match the dimensions
pub fn flatten_on_background(
    image: &RasterImage,
    backdrop: Backdrop,
) -> Result<RasterImage, IdPhotoError> {
    if image.is_empty() {
        return Err(IdPhotoError::CompositingUnavailable {
            width: image.width,
            height: image.height,
        });
    }
    image.ensure_well_formed()?;

    let bg = backdrop.0;
    let mut output = Vec::with_capacity(image.pixels.len());

    for px in image.pixels.chunks_exact(RasterImage::CHANNELS) {
        match px[3] {
            255 => output.extend_from_slice(&[px[0], px[1], px[2], 255]),
            0 => output.extend_from_slice(&[bg[0], bg[1], bg[2], 255]),
            a => {
                let alpha = a as f32 / 255.0;
                let inv = 1.0 - alpha;
                for c in 0..3 {
                    let v = px[c] as f32 * alpha + bg[c] as f32 * inv;
                    output.push(v.round().clamp(0.0, 255.0) as u8);
                }
                output.push(255);
            }
        }
    }

    debug!(
        width = image.width,
        height = image.height,
        ?backdrop,
        "Flattened image onto backdrop"
    );
    Ok(RasterImage::new(image.width, image.height, output))
}

/// Run `segmenter` on `image` and flatten the result onto `backdrop`.
///
/// The original image is only borrowed; on failure the caller still holds
/// it unchanged.
///
/// # Errors
///
/// - `SegmentationFailure` if the model fails or returns a different size
/// - `CompositingUnavailable` if the segmented image is empty
pub fn remove_background<S: Segmenter + ?Sized>(
    segmenter: &S,
    image: &RasterImage,
    backdrop: Backdrop,
) -> Result<RasterImage, IdPhotoError> {
    let cutout = segmenter.segment(image).map_err(|e| {
        warn!(error = %e, "Segmentation model failed");
        IdPhotoError::SegmentationFailure(e.0)
    })?;

    if (cutout.width, cutout.height) != (image.width, image.height) {
        warn!(
            expected_w = image.width,
            expected_h = image.height,
            got_w = cutout.width,
            got_h = cutout.height,
            "Segmentation returned a resized image"
        );
        return Err(IdPhotoError::SegmentationFailure(format!(
            "expected {}x{} mask output, got {}x{}",
            image.width, image.height, cutout.width, cutout.height
        )));
    }

    flatten_on_background(&cutout, backdrop)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rgba_image_strategy() -> impl Strategy<Value = RasterImage> {
        (1u32..=16, 1u32..=16).prop_flat_map(|(w, h)| {
            let len = (w * h * 4) as usize;
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |pixels| RasterImage::new(w, h, pixels))
        })
    }

    proptest! {
        /// Property: Flattened output is fully opaque.
        #[test]
        fn prop_output_is_opaque(
            img in rgba_image_strategy(),
            bg in any::<[u8; 3]>(),
        ) {
            let result = flatten_on_background(&img, Backdrop(bg)).unwrap();
            prop_assert!(result.is_opaque());
            prop_assert_eq!((result.width, result.height), (img.width, img.height));
        }

        /// Property: Fully transparent input pixels become exactly the backdrop.
        #[test]
        fn prop_transparent_pixels_match_backdrop(
            img in rgba_image_strategy(),
            bg in any::<[u8; 3]>(),
        ) {
            let result = flatten_on_background(&img, Backdrop(bg)).unwrap();
            for (src, out) in img.pixels.chunks_exact(4).zip(result.pixels.chunks_exact(4)) {
                if src[3] == 0 {
                    prop_assert_eq!(out, &[bg[0], bg[1], bg[2], 255][..]);
                }
            }
        }
    }
}
