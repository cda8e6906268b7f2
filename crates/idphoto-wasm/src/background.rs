//! WASM bindings for background flattening.
//!
//! Segmentation runs in JavaScript (the model ships as its own bundle); the
//! cut-out it produces comes back here to be laid onto a solid colour.

use crate::js_error;
use crate::types::JsRasterImage;
use idphoto_core::background::{flatten_on_background as core_flatten, Backdrop};
use wasm_bindgen::prelude::*;

/// Composite a transparent cut-out over an opaque RGB colour.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cutout = await segmenter.run(source);
/// const flat = flatten_on_background(cutout, 255, 255, 255);
/// ```
#[wasm_bindgen]
pub fn flatten_on_background(
    image: &JsRasterImage,
    r: u8,
    g: u8,
    b: u8,
) -> Result<JsRasterImage, JsValue> {
    core_flatten(&image.to_raster(), Backdrop([r, g, b]))
        .map(JsRasterImage::from_raster)
        .map_err(js_error)
}
