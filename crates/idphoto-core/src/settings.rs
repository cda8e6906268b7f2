//! Export configuration.
//!
//! Every field has a default, and deserialization fills in whatever the
//! caller leaves out, so the front-end can send `{}` or a partial object.

use serde::{Deserialize, Serialize};

use crate::background::Backdrop;
use crate::error::IdPhotoError;

/// Resolution used for every physical-size conversion.
pub const DEFAULT_PPI: u32 = 300;

/// Lowest accepted export resolution.
pub const MIN_PPI: u32 = 72;

/// Highest accepted export resolution; a 4x6 sheet is 4800x7200 here.
pub const MAX_PPI: u32 = 1200;

/// JPEG quality for exported photos and sheets.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Light gray (#e5e7eb) cut-guide colour.
pub const DEFAULT_GUIDE_COLOR: [u8; 3] = [229, 231, 235];

/// Photo paper size in inches, orientation-free.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaperSize {
    pub short_edge_in: f64,
    pub long_edge_in: f64,
}

impl PaperSize {
    /// Standard 4x6 inch photo paper.
    pub const FOUR_BY_SIX: PaperSize = PaperSize {
        short_edge_in: 4.0,
        long_edge_in: 6.0,
    };

    /// `(short, long)` edge lengths in pixels.
    pub fn pixel_edges(&self, ppi: u32) -> (u32, u32) {
        let ppi = ppi as f64;
        (
            (self.short_edge_in * ppi).round() as u32,
            (self.long_edge_in * ppi).round() as u32,
        )
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        Self::FOUR_BY_SIX
    }
}

/// Settings for single-photo and print-sheet export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Pixels per inch for mm-to-pixel conversion.
    pub ppi: u32,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// Paper the print sheet is laid out on.
    pub paper: PaperSize,
    /// Gap between tiles, and before the first tile, in pixels.
    pub gap_px: f64,
    /// Colour that residual transparency is flattened onto.
    pub backdrop: Backdrop,
    /// Colour of the 1px cut guide around each tile.
    pub guide_color: [u8; 3],
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            ppi: DEFAULT_PPI,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            paper: PaperSize::default(),
            gap_px: 0.0,
            backdrop: Backdrop::default(),
            guide_color: DEFAULT_GUIDE_COLOR,
        }
    }
}

impl ExportSettings {
    /// Reject a resolution outside [`MIN_PPI`]..=[`MAX_PPI`].
    pub fn validate(&self) -> Result<(), IdPhotoError> {
        if !(MIN_PPI..=MAX_PPI).contains(&self.ppi) {
            return Err(IdPhotoError::InvalidResolution {
                ppi: self.ppi,
                min: MIN_PPI,
                max: MAX_PPI,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paper_pixels() {
        assert_eq!(PaperSize::default().pixel_edges(300), (1200, 1800));
        assert_eq!(PaperSize::FOUR_BY_SIX.pixel_edges(600), (2400, 3600));
    }

    #[test]
    fn test_default_settings() {
        let settings = ExportSettings::default();
        assert_eq!(settings.ppi, 300);
        assert_eq!(settings.jpeg_quality, 95);
        assert_eq!(settings.gap_px, 0.0);
        assert_eq!(settings.backdrop, Backdrop::WHITE);
        assert_eq!(settings.guide_color, [229, 231, 235]);
    }

    #[test]
    fn test_validate_resolution_range() {
        assert!(ExportSettings::default().validate().is_ok());

        for ppi in [0, 71, 1201, u32::MAX] {
            let settings = ExportSettings {
                ppi,
                ..Default::default()
            };
            assert!(
                matches!(
                    settings.validate(),
                    Err(IdPhotoError::InvalidResolution { .. })
                ),
                "ppi {ppi}"
            );
        }
        for ppi in [MIN_PPI, MAX_PPI] {
            let settings = ExportSettings {
                ppi,
                ..Default::default()
            };
            assert!(settings.validate().is_ok());
        }
    }
}
