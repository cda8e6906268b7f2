//! WASM bindings for the export pipeline.
//!
//! # Example
//!
//! ```typescript
//! const snapshot = {
//!   crop: { x: 12, y: 40, width: 350, height: 450 },
//!   rotation_degrees: 3.5,
//! };
//! const artifact = export_single(source, 'jp-passport', snapshot, undefined);
//! download(new Blob([artifact.bytes()], { type: artifact.mime_type }), artifact.filename);
//! ```

use crate::js_error;
use crate::settings::settings_from_js;
use crate::types::JsRasterImage;
use idphoto_core::export::{self, CropSnapshot, ExportArtifact};
use idphoto_core::presets::{find_preset, PresetSpec};
use idphoto_core::IdPhotoError;
use wasm_bindgen::prelude::*;

/// An encoded file ready for download.
#[wasm_bindgen]
pub struct JsExportArtifact {
    filename: String,
    mime_type: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsExportArtifact {
    /// Suggested download name, e.g. `id-photo-us-passport.jpg`
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.filename.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    /// Encoded file contents as Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl From<ExportArtifact> for JsExportArtifact {
    fn from(artifact: ExportArtifact) -> Self {
        Self {
            filename: artifact.filename,
            mime_type: artifact.mime_type.to_string(),
            bytes: artifact.bytes,
        }
    }
}

fn lookup_preset(preset_id: &str) -> Result<&'static PresetSpec, IdPhotoError> {
    find_preset(preset_id).ok_or_else(|| IdPhotoError::UnknownPreset(preset_id.to_string()))
}

fn snapshot_from_js(value: JsValue) -> Result<CropSnapshot, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Export the cropped photo as a single JPEG named after the preset.
///
/// # Errors
///
/// Throws for an unknown preset id, a malformed snapshot, or a crop that
/// does not fit the rotated image. No artifact is produced on failure.
#[wasm_bindgen]
pub fn export_single(
    source: &JsRasterImage,
    preset_id: &str,
    snapshot: JsValue,
    settings: JsValue,
) -> Result<JsExportArtifact, JsValue> {
    let preset = lookup_preset(preset_id).map_err(js_error)?;
    let snapshot = snapshot_from_js(snapshot)?;
    let settings = settings_from_js(settings)?;

    export::export_single(&source.to_raster(), &snapshot, preset, &settings)
        .map(JsExportArtifact::from)
        .map_err(js_error)
}

/// Export the cropped photo tiled over a 4x6 print sheet.
#[wasm_bindgen]
pub fn export_print_sheet(
    source: &JsRasterImage,
    preset_id: &str,
    snapshot: JsValue,
    settings: JsValue,
) -> Result<JsExportArtifact, JsValue> {
    let preset = lookup_preset(preset_id).map_err(js_error)?;
    let snapshot = snapshot_from_js(snapshot)?;
    let settings = settings_from_js(settings)?;

    export::export_print_sheet(&source.to_raster(), &snapshot, preset, &settings)
        .map(JsExportArtifact::from)
        .map_err(js_error)
}
