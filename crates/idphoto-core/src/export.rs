//! Export pipeline: crop snapshot in, downloadable JPEG out.
//!
//! ```text
//! crop widget ──► composite ──► encode                 (single photo)
//!                     └────────► pack ──► encode       (print sheet)
//! ```
//!
//! Background removal, when requested, happens before the snapshot is taken
//! and replaces the source image the widget works on.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decode::RasterImage;
use crate::encode::encode_raster_jpeg;
use crate::error::IdPhotoError;
use crate::presets::PresetSpec;
use crate::settings::ExportSettings;
use crate::sheet::pack_with_settings;
use crate::transform::{composite_with_flip, CropRect, Flip};

/// Final state of the crop widget. Zoom and pan are already folded into
/// `crop`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropSnapshot {
    pub crop: CropRect,
    #[serde(default)]
    pub rotation_degrees: f64,
    #[serde(default)]
    pub flip: Flip,
}

/// An encoded file ready to be offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

const JPEG_MIME: &str = "image/jpeg";

/// Crop `source` per `snapshot` and render it without encoding.
pub fn render_photo(
    source: &RasterImage,
    snapshot: &CropSnapshot,
) -> Result<RasterImage, IdPhotoError> {
    composite_with_flip(
        source,
        snapshot.rotation_degrees,
        &snapshot.crop,
        snapshot.flip,
    )
}

/// Export one finished ID photo as `id-photo-<presetId>.jpg`.
pub fn export_single(
    source: &RasterImage,
    snapshot: &CropSnapshot,
    preset: &PresetSpec,
    settings: &ExportSettings,
) -> Result<ExportArtifact, IdPhotoError> {
    let photo = render_photo(source, snapshot)?;
    let bytes = encode_raster_jpeg(&photo, settings.jpeg_quality, settings.backdrop)?;

    debug!(
        preset = preset.id,
        width = photo.width,
        height = photo.height,
        bytes = bytes.len(),
        "Exported single photo"
    );
    Ok(ExportArtifact {
        filename: preset.photo_filename(),
        mime_type: JPEG_MIME,
        bytes,
    })
}

/// Export a tiled print sheet as `id-photo-print-<presetId>.jpg`.
pub fn export_print_sheet(
    source: &RasterImage,
    snapshot: &CropSnapshot,
    preset: &PresetSpec,
    settings: &ExportSettings,
) -> Result<ExportArtifact, IdPhotoError> {
    let photo = render_photo(source, snapshot)?;
    let sheet = pack_with_settings(&photo, preset.width_mm, preset.height_mm, settings)?;
    let bytes = encode_raster_jpeg(&sheet, settings.jpeg_quality, settings.backdrop)?;

    debug!(
        preset = preset.id,
        width = sheet.width,
        height = sheet.height,
        bytes = bytes.len(),
        "Exported print sheet"
    );
    Ok(ExportArtifact {
        filename: preset.print_filename(),
        mime_type: JPEG_MIME,
        bytes,
    })
}
