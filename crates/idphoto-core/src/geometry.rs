//! Geometry helpers shared by the compositors.
//!
//! Angles are in degrees, positive = clockwise (image coordinates, y down).

use serde::{Deserialize, Serialize};

use crate::error::IdPhotoError;

/// Millimetres per inch, used for physical-size conversions.
pub const MM_PER_INCH: f64 = 25.4;

/// Tolerance used when snapping an angle to a quarter turn.
const ANGLE_EPSILON: f64 = 0.001;

/// Convert degrees to radians.
#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Convert a physical length to pixels at the given resolution.
#[inline]
pub fn mm_to_px(mm: f64, ppi: u32) -> f64 {
    mm / MM_PER_INCH * ppi as f64
}

/// Fold an arbitrary angle into the range (-180, 180].
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    if wrapped > 180.0 {
        wrapped - 360.0
    } else if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Reject NaN and infinite angles, which have no bounding box.
pub fn check_rotation(rotation_degrees: f64) -> Result<(), IdPhotoError> {
    if rotation_degrees.is_finite() {
        Ok(())
    } else {
        Err(IdPhotoError::InvalidRotation {
            degrees: rotation_degrees,
        })
    }
}

/// Axis-aligned box enclosing a rotated rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Integer canvas size for this box, never smaller than 1x1.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width.round() as u32).max(1),
            (self.height.round() as u32).max(1),
        )
    }
}

/// Compute the smallest axis-aligned box containing a `width` x `height`
/// rectangle rotated about its centre.
///
/// ```text
/// bw = |cos θ|·w + |sin θ|·h
/// bh = |sin θ|·w + |cos θ|·h
/// ```
///
/// Quarter turns are snapped so that 0° and 180° return the input size and
/// ±90° return it swapped, without floating-point residue.
pub fn rotated_bounding_box(width: f64, height: f64, rotation_degrees: f64) -> BoundingBox {
    let angle = normalize_degrees(rotation_degrees);
    let abs_angle = angle.abs();

    if abs_angle < ANGLE_EPSILON || (abs_angle - 180.0).abs() < ANGLE_EPSILON {
        return BoundingBox { width, height };
    }
    if (abs_angle - 90.0).abs() < ANGLE_EPSILON {
        return BoundingBox {
            width: height,
            height: width,
        };
    }

    let rad = to_radians(angle);
    let cos = rad.cos().abs();
    let sin = rad.sin().abs();

    BoundingBox {
        width: cos * width + sin * height,
        height: sin * width + cos * height,
    }
}

/// Which quarter turn an angle lands on exactly, if any.
///
/// Returns the clockwise count (0..=3) when `rotation_degrees` is within
/// tolerance of a multiple of 90°.
pub fn quarter_turns(rotation_degrees: f64) -> Option<u8> {
    let angle = normalize_degrees(rotation_degrees);
    let turns = (angle / 90.0).round();
    if (angle - turns * 90.0).abs() < ANGLE_EPSILON {
        Some(turns.rem_euclid(4.0) as u8)
    } else {
        None
    }
}
