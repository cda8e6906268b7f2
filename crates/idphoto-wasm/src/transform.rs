//! WASM bindings for the crop compositor.
//!
//! The crop widget works in the coordinate space of the rotated bounding
//! box, so the front-end first asks for that box, lets the user place the
//! crop inside it, then calls `composite` with the final rectangle.

use crate::js_error;
use crate::types::JsRasterImage;
use idphoto_core::geometry::{check_rotation, rotated_bounding_box as core_bounding_box};
use idphoto_core::transform::{composite_with_flip, CropRect, Flip};
use wasm_bindgen::prelude::*;

/// Size of the box that fully contains a `width` x `height` image rotated by
/// `rotation_degrees`.
///
/// Returns `{ width, height }` as fractional pixels. Quarter turns are exact.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const box = rotated_bounding_box(img.width, img.height, 90);
/// cropper.setBounds(box.width, box.height);
/// ```
#[wasm_bindgen]
pub fn rotated_bounding_box(
    width: f64,
    height: f64,
    rotation_degrees: f64,
) -> Result<JsValue, JsValue> {
    check_rotation(rotation_degrees).map_err(js_error)?;
    let bbox = core_bounding_box(width, height, rotation_degrees);
    serde_wasm_bindgen::to_value(&bbox).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render the crop rectangle of `image` rotated clockwise by
/// `rotation_degrees` about its centre.
///
/// The crop is given in bounding-box coordinates and the output is exactly
/// `crop_width` x `crop_height`. Areas outside the rotated image come out
/// transparent.
///
/// # Errors
///
/// Throws if the angle is not finite, if `image.pixels` does not hold
/// `width * height * 4` bytes, or if the crop does not lie inside the
/// rotated bounding box.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn composite(
    image: &JsRasterImage,
    rotation_degrees: f64,
    crop_x: u32,
    crop_y: u32,
    crop_width: u32,
    crop_height: u32,
    flip_horizontal: bool,
    flip_vertical: bool,
) -> Result<JsRasterImage, JsValue> {
    let crop = CropRect::new(crop_x, crop_y, crop_width, crop_height);
    let flip = Flip {
        horizontal: flip_horizontal,
        vertical: flip_vertical,
    };

    composite_with_flip(&image.to_raster(), rotation_degrees, &crop, flip)
        .map(JsRasterImage::from_raster)
        .map_err(js_error)
}
