//! Print-sheet packing.
//!
//! A finished ID photo is repeated edge to edge on standard photo paper so
//! several copies come out of one print. Both paper orientations are tried
//! and the one holding more tiles wins; on a tie the short-edge-as-width
//! (portrait) sheet is kept.
//!
//! # Fit Rule
//!
//! The per-axis count is `round((dim + gap) / (item + gap))`, not `floor`.
//! A tile that almost divides the sheet still claims the last slot; that
//! slot is clipped at the paper edge when drawn. Changing the rule changes
//! observable tile counts.

use std::collections::HashMap;

use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decode::RasterImage;
use crate::error::IdPhotoError;
use crate::geometry::mm_to_px;
use crate::settings::ExportSettings;

/// Which paper edge runs horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheetOrientation {
    /// Short edge as width (e.g. 1200x1800 at 300 PPI).
    Portrait,
    /// Long edge as width (e.g. 1800x1200 at 300 PPI).
    Landscape,
}

/// Grid chosen for one print sheet. Computed per export, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintSheetLayout {
    pub orientation: SheetOrientation,
    pub canvas_width_px: u32,
    pub canvas_height_px: u32,
    pub columns: u32,
    pub rows: u32,
    pub tile_width_px: f64,
    pub tile_height_px: f64,
    pub gap_px: f64,
}

impl PrintSheetLayout {
    pub fn tile_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Top-left corner of the tile at (`column`, `row`).
    pub fn tile_origin(&self, column: u32, row: u32) -> (f64, f64) {
        (
            self.gap_px + column as f64 * (self.tile_width_px + self.gap_px),
            self.gap_px + row as f64 * (self.tile_height_px + self.gap_px),
        )
    }

    /// Whole-pixel rectangle `(x, y, width, height)` of the cell at
    /// (`column`, `row`).
    ///
    /// Each edge is the rounded real-valued edge, and a cell ends where the
    /// next one starts (minus the gap), so neighbouring cells share their
    /// boundary with no seam or overlap.
    pub fn cell_rect(&self, column: u32, row: u32) -> (i64, i64, u32, u32) {
        let (left, top) = self.tile_origin(column, row);
        let (next_left, next_top) = self.tile_origin(column + 1, row + 1);
        let x0 = left.round() as i64;
        let y0 = top.round() as i64;
        let x1 = (next_left - self.gap_px).round() as i64;
        let y1 = (next_top - self.gap_px).round() as i64;
        (x0, y0, (x1 - x0).max(1) as u32, (y1 - y0).max(1) as u32)
    }
}

/// Number of items of size `item` that fit along `dim` with `gap` between them.
pub fn fit_count(dim: f64, item: f64, gap: f64) -> u32 {
    let pitch = item + gap;
    if pitch.is_nan() || pitch <= 0.0 {
        return 0;
    }
    ((dim + gap) / pitch).round().max(0.0) as u32
}

/// Choose paper orientation and grid for tiles of the given physical size.
///
/// # Errors
///
/// - `InvalidResolution` if `settings.ppi` is out of range
/// - `InvalidPhysicalSize` unless both sizes are finite and positive
pub fn plan_layout(
    tile_width_mm: f64,
    tile_height_mm: f64,
    settings: &ExportSettings,
) -> Result<PrintSheetLayout, IdPhotoError> {
    settings.validate()?;
    let valid = |mm: f64| mm.is_finite() && mm > 0.0;
    if !valid(tile_width_mm) || !valid(tile_height_mm) {
        return Err(IdPhotoError::InvalidPhysicalSize {
            width_mm: tile_width_mm,
            height_mm: tile_height_mm,
        });
    }

    let tile_w = mm_to_px(tile_width_mm, settings.ppi);
    let tile_h = mm_to_px(tile_height_mm, settings.ppi);
    let gap = settings.gap_px;
    let (short, long) = settings.paper.pixel_edges(settings.ppi);

    let candidate = |orientation, canvas_w: u32, canvas_h: u32| PrintSheetLayout {
        orientation,
        canvas_width_px: canvas_w,
        canvas_height_px: canvas_h,
        columns: fit_count(canvas_w as f64, tile_w, gap),
        rows: fit_count(canvas_h as f64, tile_h, gap),
        tile_width_px: tile_w,
        tile_height_px: tile_h,
        gap_px: gap,
    };

    let portrait = candidate(SheetOrientation::Portrait, short, long);
    let landscape = candidate(SheetOrientation::Landscape, long, short);

    let chosen = if landscape.tile_count() > portrait.tile_count() {
        landscape
    } else {
        portrait
    };

    debug!(
        tile_w,
        tile_h,
        portrait = portrait.tile_count(),
        landscape = landscape.tile_count(),
        orientation = ?chosen.orientation,
        columns = chosen.columns,
        rows = chosen.rows,
        "Planned print sheet"
    );
    Ok(chosen)
}

/// Tile `tile` over a 4x6 sheet at 300 PPI with default settings.
pub fn pack(
    tile: &RasterImage,
    tile_width_mm: f64,
    tile_height_mm: f64,
) -> Result<RasterImage, IdPhotoError> {
    pack_with_settings(tile, tile_width_mm, tile_height_mm, &ExportSettings::default())
}

/// Render the print sheet: white paper, the photo scaled into every cell of
/// the planned grid, and a 1px cut guide around each cell.
///
/// Tiles that run past the paper edge are clipped; the canvas is always
/// exactly the paper size.
///
/// # Errors
///
/// - `InvalidResolution` if `settings.ppi` is out of range
/// - `InvalidPhysicalSize` for non-positive tile sizes
/// - `CompositingUnavailable` if `tile` is empty
pub fn pack_with_settings(
    tile: &RasterImage,
    tile_width_mm: f64,
    tile_height_mm: f64,
    settings: &ExportSettings,
) -> Result<RasterImage, IdPhotoError> {
    let layout = plan_layout(tile_width_mm, tile_height_mm, settings)?;
    render_sheet(tile, &layout, settings.guide_color)
}

/// Draw `tile` into every cell of `layout`.
pub fn render_sheet(
    tile: &RasterImage,
    layout: &PrintSheetLayout,
    guide_color: [u8; 3],
) -> Result<RasterImage, IdPhotoError> {
    if tile.is_empty() {
        return Err(IdPhotoError::CompositingUnavailable {
            width: tile.width,
            height: tile.height,
        });
    }
    let source = tile.to_rgba_image()?;

    let mut canvas = RgbaImage::from_pixel(
        layout.canvas_width_px,
        layout.canvas_height_px,
        Rgba([255, 255, 255, 255]),
    );

    let guide = Rgba([guide_color[0], guide_color[1], guide_color[2], 255]);
    // Cells differ by at most a pixel, so only a couple of sizes get resized
    let mut scaled: HashMap<(u32, u32), RgbaImage> = HashMap::new();

    for row in 0..layout.rows {
        for column in 0..layout.columns {
            let (x, y, cell_w, cell_h) = layout.cell_rect(column, row);
            let cell = scaled.entry((cell_w, cell_h)).or_insert_with(|| {
                if source.dimensions() == (cell_w, cell_h) {
                    source.clone()
                } else {
                    imageops::resize(&source, cell_w, cell_h, imageops::FilterType::Lanczos3)
                }
            });

            imageops::overlay(&mut canvas, &*cell, x, y);
            draw_hollow_rect_mut(
                &mut canvas,
                Rect::at(x as i32, y as i32).of_size(cell_w, cell_h),
                guide,
            );
        }
    }

    debug!(
        width = layout.canvas_width_px,
        height = layout.canvas_height_px,
        tiles = layout.tile_count(),
        "Rendered print sheet"
    );
    Ok(RasterImage::from_rgba_image(canvas))
}
