//! WASM bindings for the print-sheet packer.

use crate::js_error;
use crate::settings::settings_from_js;
use crate::types::JsRasterImage;
use idphoto_core::sheet::{pack_with_settings, plan_layout};
use wasm_bindgen::prelude::*;

/// Plan the grid for tiles of `width_mm` x `height_mm` without rendering.
///
/// Returns the serialized `PrintSheetLayout` so the UI can show how many
/// copies fit before exporting. `settings` may be `undefined` or a partial
/// `ExportSettings` object.
#[wasm_bindgen]
pub fn plan_print_layout(
    width_mm: f64,
    height_mm: f64,
    settings: JsValue,
) -> Result<JsValue, JsValue> {
    let settings = settings_from_js(settings)?;
    let layout = plan_layout(width_mm, height_mm, &settings).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&layout).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tile a finished photo over a sheet of photo paper.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const sheet = pack_print_sheet(photo, 35, 45, undefined);
/// // sheet.width x sheet.height == 1200 x 1800
/// ```
#[wasm_bindgen]
pub fn pack_print_sheet(
    tile: &JsRasterImage,
    width_mm: f64,
    height_mm: f64,
    settings: JsValue,
) -> Result<JsRasterImage, JsValue> {
    let settings = settings_from_js(settings)?;
    pack_with_settings(&tile.to_raster(), width_mm, height_mm, &settings)
        .map(JsRasterImage::from_raster)
        .map_err(js_error)
}
