//! Preset catalog exposed to the front-end.

use idphoto_core::presets::{presets, PresetSpec};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PresetEntry<'a> {
    #[serde(flatten)]
    spec: &'a PresetSpec,
    aspect_ratio: f64,
}

fn catalog() -> Vec<PresetEntry<'static>> {
    presets()
        .iter()
        .map(|spec| PresetEntry {
            spec,
            aspect_ratio: spec.aspect_ratio(),
        })
        .collect()
}

/// All presets in display order, as
/// `{ id, name, widthMm, heightMm, description, region, aspectRatio }`.
#[wasm_bindgen]
pub fn get_presets() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&catalog()).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_carries_aspect_ratio() {
        let entries = catalog();
        assert_eq!(entries.len(), presets().len());
        let jp = entries.iter().find(|e| e.spec.id == "jp-passport").unwrap();
        assert!((jp.aspect_ratio - 35.0 / 45.0).abs() < 1e-12);
    }
}
