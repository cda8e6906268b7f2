//! WASM bindings for JPEG encoding.
//!
//! # Example
//!
//! ```typescript
//! import { encode_jpeg } from '@idphoto/wasm';
//!
//! const jpegBytes = encode_jpeg(photo, 95);
//! const blob = new Blob([jpegBytes], { type: 'image/jpeg' });
//! ```

use crate::js_error;
use crate::types::JsRasterImage;
use idphoto_core::background::Backdrop;
use idphoto_core::encode::encode_raster_jpeg;
use idphoto_core::IdPhotoError;
use wasm_bindgen::prelude::*;

/// Encode an RGBA image as JPEG.
///
/// JPEG has no alpha channel; transparent pixels are flattened onto white.
///
/// # Arguments
///
/// * `image` - Image to encode
/// * `quality` - JPEG quality (1-100, values outside are clamped)
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsRasterImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode_raster_jpeg(&image.to_raster(), quality, Backdrop::WHITE)
        .map_err(|e| js_error(IdPhotoError::from(e)))
}
