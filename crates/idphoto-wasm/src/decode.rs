//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@idphoto/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::js_error;
use crate::types::JsRasterImage;
use idphoto_core::decode;
use idphoto_core::IdPhotoError;
use wasm_bindgen::prelude::*;

/// Decode an uploaded photo (JPEG or PNG) to RGBA, honouring EXIF orientation.
///
/// # Errors
///
/// Throws if the bytes are not a supported image; the user should pick
/// another file.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(|e| js_error(IdPhotoError::from(e)))
}

#[cfg(test)]
mod tests {
    use idphoto_core::decode::decode_image as core_decode;
    use idphoto_core::encode::encode_jpeg;

    use super::*;

    #[test]
    fn test_decoded_image_wraps_core_output() {
        let rgb = vec![128u8; 5 * 4 * 3];
        let bytes = encode_jpeg(&rgb, 5, 4, 90).unwrap();

        let js_img = JsRasterImage::from_raster(core_decode(&bytes).unwrap());
        assert_eq!((js_img.width(), js_img.height()), (5, 4));
        assert_eq!(js_img.byte_length(), 5 * 4 * 4);
    }
}
