//! ID Photo Core - geometric compositing for ID document photos
//!
//! This crate turns an uploaded photo plus the crop widget's final
//! rectangle and rotation into a finished ID photo, optionally flattens a
//! background-removed cut-out onto white, and tiles the result onto 4x6
//! photo paper for printing.
//!
//! Every compositor is a pure function: rasters and parameters in, a new
//! raster out. Nothing is cached between calls.

pub mod background;
pub mod decode;
pub mod encode;
pub mod error;
pub mod export;
pub mod geometry;
pub mod presets;
pub mod settings;
pub mod sheet;
pub mod transform;

pub use background::{flatten_on_background, remove_background, Backdrop, Segmenter};
pub use decode::{decode_image, RasterImage};
pub use error::IdPhotoError;
pub use export::{export_print_sheet, export_single, CropSnapshot, ExportArtifact};
pub use geometry::{rotated_bounding_box, to_radians, BoundingBox};
pub use presets::{find_preset, presets, PresetSpec};
pub use settings::{ExportSettings, PaperSize};
pub use sheet::{pack, plan_layout, PrintSheetLayout, SheetOrientation};
pub use transform::{composite, composite_with_flip, CropRect, Flip};

/// Convenience alias for results carrying [`IdPhotoError`].
pub type Result<T> = std::result::Result<T, IdPhotoError>;
