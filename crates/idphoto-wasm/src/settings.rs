//! Reading export settings passed in from JavaScript.

use idphoto_core::ExportSettings;
use wasm_bindgen::prelude::*;

/// Deserialize `ExportSettings`, treating `undefined` and `null` as defaults.
///
/// Any field left out of a partial object keeps its default value.
pub(crate) fn settings_from_js(value: JsValue) -> Result<ExportSettings, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(ExportSettings::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
