//! Built-in catalog of ID photo formats.

use serde::Serialize;

use crate::geometry::mm_to_px;

/// A government ID photo format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub width_mm: f64,
    pub height_mm: f64,
    pub description: &'static str,
    pub region: &'static str,
}

impl PresetSpec {
    /// Width / height; drives the crop widget's aspect lock.
    pub fn aspect_ratio(&self) -> f64 {
        self.width_mm / self.height_mm
    }

    /// Rounded pixel size of the finished photo at `ppi`.
    pub fn pixel_size(&self, ppi: u32) -> (u32, u32) {
        (
            mm_to_px(self.width_mm, ppi).round() as u32,
            mm_to_px(self.height_mm, ppi).round() as u32,
        )
    }

    /// Download name for a single exported photo.
    pub fn photo_filename(&self) -> String {
        format!("id-photo-{}.jpg", self.id)
    }

    /// Download name for an exported print sheet.
    pub fn print_filename(&self) -> String {
        format!("id-photo-print-{}.jpg", self.id)
    }
}

static PRESETS: [PresetSpec; 6] = [
    PresetSpec {
        id: "us-passport",
        name: "U.S. Passport",
        width_mm: 51.0,
        height_mm: 51.0,
        description: "2x2 inches. White background.",
        region: "USA",
    },
    PresetSpec {
        id: "jp-passport",
        name: "Japanese Passport",
        width_mm: 35.0,
        height_mm: 45.0,
        description: "35x45mm. Neutral face.",
        region: "Japan",
    },
    PresetSpec {
        id: "cn-passport",
        name: "Chinese Passport",
        width_mm: 33.0,
        height_mm: 48.0,
        description: "33x48mm. White/Blue background.",
        region: "China",
    },
    PresetSpec {
        id: "uk-passport",
        name: "UK Passport",
        width_mm: 35.0,
        height_mm: 45.0,
        description: "35x45mm. Cream/Grey background.",
        region: "UK",
    },
    PresetSpec {
        id: "eu-schengen",
        name: "Schengen Visa (EU)",
        width_mm: 35.0,
        height_mm: 45.0,
        description: "Standard 35x45mm.",
        region: "Europe",
    },
    PresetSpec {
        id: "in-passport",
        name: "Indian Passport",
        width_mm: 51.0,
        height_mm: 51.0,
        description: "2x2 inches (51x51mm).",
        region: "India",
    },
];

/// All presets, in display order.
pub fn presets() -> &'static [PresetSpec] {
    &PRESETS
}

/// Preset selected when the app opens.
pub fn default_preset() -> &'static PresetSpec {
    &PRESETS[0]
}

pub fn find_preset(id: &str) -> Option<&'static PresetSpec> {
    PRESETS.iter().find(|p| p.id == id)
}
