//! ID Photo WASM - WebAssembly bindings for the ID photo compositor
//!
//! This crate exposes idphoto-core to the browser front-end. The crop
//! widget, file picker and segmentation model live in JavaScript; every
//! pixel operation runs here.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for RGBA rasters
//! - `decode` - Uploaded photo decoding
//! - `transform` - Rotated bounding box and crop compositing
//! - `background` - Flattening cut-outs onto a solid colour
//! - `sheet` - Print sheet planning and packing
//! - `encode` - JPEG encoding
//! - `presets` - ID photo format catalog
//! - `export` - One-call export of single photos and print sheets
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, rotated_bounding_box, composite } from '@idphoto/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const box = rotated_bounding_box(image.width, image.height, angle);
//! const photo = composite(image, angle, crop.x, crop.y, crop.width, crop.height, false, false);
//! ```

use std::fmt::Display;

use wasm_bindgen::prelude::*;

mod background;
mod decode;
mod encode;
mod export;
mod presets;
mod settings;
mod sheet;
mod transform;
mod types;

pub use background::flatten_on_background;
pub use decode::decode_image;
pub use encode::encode_jpeg;
pub use export::{export_print_sheet, export_single, JsExportArtifact};
pub use presets::get_presets;
pub use sheet::{pack_print_sheet, plan_print_layout};
pub use transform::{composite, rotated_bounding_box};
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Log a failed operation to the browser console and turn it into a thrown
/// JavaScript error.
pub(crate) fn js_error(err: impl Display) -> JsValue {
    let message = err.to_string();
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
