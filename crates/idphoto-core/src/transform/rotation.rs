//! Rendering a source image rotated about its centre onto its bounding box.
//!
//! The source is placed at the centre of a canvas the size of its rotated
//! bounding box and turned by the requested angle (positive = clockwise),
//! without scaling. Canvas pixels not covered by the source stay fully
//! transparent.
//!
//! # Algorithm
//!
//! Exact quarter turns are done with lossless pixel moves. Other angles use
//! inverse mapping: for each destination pixel centre we find the source
//! point it came from and sample it with premultiplied bilinear
//! interpolation, treating everything outside the source as transparent so
//! the rotated edges come out anti-aliased.
//!
//! For a clockwise angle θ in image coordinates (y down):
//! ```text
//! src_x =  (dst_x - cx) * cos θ + (dst_y - cy) * sin θ + src_cx
//! src_y = -(dst_x - cx) * sin θ + (dst_y - cy) * cos θ + src_cy
//! ```

use image::imageops;
use serde::{Deserialize, Serialize};

use crate::decode::RasterImage;
use crate::error::IdPhotoError;
use crate::geometry::{check_rotation, quarter_turns, rotated_bounding_box, to_radians};
use crate::transform::CropRect;

/// Mirror applied to the source about its own centre, before it is rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Flip {
    pub const NONE: Flip = Flip {
        horizontal: false,
        vertical: false,
    };

    pub fn is_none(self) -> bool {
        !self.horizontal && !self.vertical
    }
}

/// Integer size of the canvas a rotated `image` is drawn onto.
pub fn rotated_canvas_size(image: &RasterImage, rotation_degrees: f64) -> (u32, u32) {
    rotated_bounding_box(image.width as f64, image.height as f64, rotation_degrees).pixel_size()
}

/// Render the whole rotated bounding box.
///
/// # Errors
///
/// - `InvalidRotation` for a NaN or infinite angle
/// - `MalformedRaster` if the buffer does not match the dimensions
pub fn render_rotated(
    image: &RasterImage,
    rotation_degrees: f64,
    flip: Flip,
) -> Result<RasterImage, IdPhotoError> {
    check_rotation(rotation_degrees)?;
    let (canvas_w, canvas_h) = rotated_canvas_size(image, rotation_degrees);
    render_window(
        image,
        rotation_degrees,
        flip,
        &CropRect::full(canvas_w, canvas_h),
    )
}

/// Render only the part of the rotated bounding box under `window`.
///
/// Produces the same pixels as rendering the full canvas and cutting the
/// window out of it. The angle must be finite and `window` must already be
/// validated against [`rotated_canvas_size`].
pub(crate) fn render_window(
    image: &RasterImage,
    rotation_degrees: f64,
    flip: Flip,
    window: &CropRect,
) -> Result<RasterImage, IdPhotoError> {
    image.ensure_well_formed()?;
    match quarter_turns(rotation_degrees) {
        Some(turns) => render_quarter_turn(image, turns, flip, window),
        None => Ok(render_resampled(image, rotation_degrees, flip, window)),
    }
}

fn render_quarter_turn(
    image: &RasterImage,
    turns: u8,
    flip: Flip,
    window: &CropRect,
) -> Result<RasterImage, IdPhotoError> {
    let mut buf = image.to_rgba_image()?;

    // The canvas applies flip in the source frame before rotating
    if flip.horizontal {
        imageops::flip_horizontal_in_place(&mut buf);
    }
    if flip.vertical {
        imageops::flip_vertical_in_place(&mut buf);
    }

    let rotated = match turns {
        1 => imageops::rotate90(&buf),
        2 => imageops::rotate180(&buf),
        3 => imageops::rotate270(&buf),
        _ => buf,
    };

    let cropped =
        imageops::crop_imm(&rotated, window.x, window.y, window.width, window.height).to_image();
    Ok(RasterImage::from_rgba_image(cropped))
}

/// Centre of the real-valued bounding box, in canvas pixels.
///
/// The canvas is the box rounded to whole pixels, but the source is centred
/// on the unrounded box.
fn canvas_centre(image: &RasterImage, rotation_degrees: f64) -> (f64, f64) {
    let bbox = rotated_bounding_box(image.width as f64, image.height as f64, rotation_degrees);
    (bbox.width / 2.0, bbox.height / 2.0)
}

fn render_resampled(
    image: &RasterImage,
    rotation_degrees: f64,
    flip: Flip,
    window: &CropRect,
) -> RasterImage {
    let angle_rad = to_radians(rotation_degrees);
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = image.width as f64 / 2.0;
    let src_cy = image.height as f64 / 2.0;
    let (dst_cx, dst_cy) = canvas_centre(image, rotation_degrees);

    let flip_x = if flip.horizontal { -1.0 } else { 1.0 };
    let flip_y = if flip.vertical { -1.0 } else { 1.0 };

    let mut output = Vec::with_capacity(window.width as usize * window.height as usize * 4);

    for wy in 0..window.height {
        for wx in 0..window.width {
            // Pixel centre relative to the canvas centre
            let dx = (window.x + wx) as f64 + 0.5 - dst_cx;
            let dy = (window.y + wy) as f64 + 0.5 - dst_cy;

            let rx = (dx * cos + dy * sin) * flip_x;
            let ry = (-dx * sin + dy * cos) * flip_y;

            // Back to pixel-index space of the source
            let src_x = rx + src_cx - 0.5;
            let src_y = ry + src_cy - 0.5;

            output.extend_from_slice(&sample_bilinear(image, src_x, src_y));
        }
    }

    RasterImage::new(window.width, window.height, output)
}

/// Premultiplied RGBA of the source pixel at (x, y); transparent outside.
#[inline]
fn premultiplied(image: &RasterImage, x: i64, y: i64) -> [f64; 4] {
    if x < 0 || y < 0 || x >= image.width as i64 || y >= image.height as i64 {
        return [0.0; 4];
    }
    let idx = (y as usize * image.width as usize + x as usize) * RasterImage::CHANNELS;
    let a = image.pixels[idx + 3] as f64 / 255.0;
    [
        image.pixels[idx] as f64 * a,
        image.pixels[idx + 1] as f64 * a,
        image.pixels[idx + 2] as f64 * a,
        a,
    ]
}

/// Sample a pixel using bilinear interpolation over premultiplied values.
fn sample_bilinear(image: &RasterImage, x: f64, y: f64) -> [u8; 4] {
    let x0f = x.floor();
    let y0f = y.floor();
    let fx = x - x0f;
    let fy = y - y0f;
    let (x0, y0) = (x0f as i64, y0f as i64);

    let p00 = premultiplied(image, x0, y0);
    let p10 = premultiplied(image, x0 + 1, y0);
    let p01 = premultiplied(image, x0, y0 + 1);
    let p11 = premultiplied(image, x0 + 1, y0 + 1);

    let mut acc = [0.0f64; 4];
    for i in 0..4 {
        acc[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }

    let alpha = acc[3];
    if alpha * 255.0 < 0.5 {
        return [0, 0, 0, 0];
    }

    [
        (acc[0] / alpha).clamp(0.0, 255.0).round() as u8,
        (acc[1] / alpha).clamp(0.0, 255.0).round() as u8,
        (acc[2] / alpha).clamp(0.0, 255.0).round() as u8,
        (alpha * 255.0).clamp(0.0, 255.0).round() as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create an opaque test image with a gradient pattern.
    fn test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y) * 8 % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        RasterImage::new(width, height, pixels)
    }

    /// 2x1 image: red on the left, green on the right.
    fn two_pixel_image() -> RasterImage {
        RasterImage::new(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255])
    }

    #[test]
    fn test_no_rotation_is_exact_copy() {
        let img = test_image(30, 20);
        let result = render_rotated(&img, 0.0, Flip::NONE).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_clockwise_quarter_turn() {
        let result = render_rotated(&two_pixel_image(), 90.0, Flip::NONE).unwrap();
        assert_eq!((result.width, result.height), (1, 2));
        // Clockwise: the left pixel ends up on top
        assert_eq!(result.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(result.pixel(0, 1), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_counter_clockwise_quarter_turn() {
        let result = render_rotated(&two_pixel_image(), -90.0, Flip::NONE).unwrap();
        assert_eq!((result.width, result.height), (1, 2));
        assert_eq!(result.pixel(0, 0), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_half_turn() {
        let result = render_rotated(&two_pixel_image(), 180.0, Flip::NONE).unwrap();
        assert_eq!(result.pixel(0, 0), Some([0, 255, 0, 255]));
        assert_eq!(result.pixel(1, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_horizontal_flip() {
        let flip = Flip {
            horizontal: true,
            vertical: false,
        };
        let result = render_rotated(&two_pixel_image(), 0.0, flip).unwrap();
        assert_eq!(result.pixel(0, 0), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_flip_then_rotate_order() {
        // Flipped source is [green, red]; a clockwise turn puts green on top
        let flip = Flip {
            horizontal: true,
            vertical: false,
        };
        let result = render_rotated(&two_pixel_image(), 90.0, flip).unwrap();
        assert_eq!(result.pixel(0, 0), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_resampled_matches_direction_of_quarter_turn() {
        // At 89.99° the resampled path should look like the lossless 90° path
        let mut img = RasterImage::filled(21, 11, [0, 0, 0, 255]);
        // Mark the right end of the middle row
        for x in 15..21 {
            let idx = ((5 * 21 + x) * 4) as usize;
            img.pixels[idx] = 255;
        }
        let result = render_rotated(&img, 89.99, Flip::NONE).unwrap();
        assert_eq!((result.width, result.height), (11, 21));
        // The right end of the source now sits at the bottom
        let bottom = result.pixel(5, 18).unwrap();
        let top = result.pixel(5, 2).unwrap();
        assert!(bottom[0] > 200, "bottom was {:?}", bottom);
        assert!(top[0] < 50, "top was {:?}", top);
    }

    #[test]
    fn test_rotation_expands_canvas_with_transparent_corners() {
        let img = test_image(100, 100);
        let result = render_rotated(&img, 45.0, Flip::NONE).unwrap();

        assert_eq!((result.width, result.height), (141, 141));
        // Corners of the bounding box are outside the rotated square
        assert_eq!(result.pixel(0, 0).map(|p| p[3]), Some(0));
        assert_eq!(result.pixel(140, 140).map(|p| p[3]), Some(0));
        // The centre is fully covered
        assert_eq!(result.pixel(70, 70).map(|p| p[3]), Some(255));
    }

    #[test]
    fn test_window_matches_full_render() {
        let img = test_image(40, 30);
        let full = render_rotated(&img, 17.0, Flip::NONE).unwrap();
        let window = CropRect::new(5, 7, 20, 12);
        let part = render_window(&img, 17.0, Flip::NONE, &window).unwrap();

        for y in 0..window.height {
            for x in 0..window.width {
                assert_eq!(part.pixel(x, y), full.pixel(window.x + x, window.y + y));
            }
        }
    }

    #[test]
    fn test_uniform_colour_survives_resampling() {
        let img = RasterImage::filled(50, 50, [90, 120, 200, 255]);
        let result = render_rotated(&img, 30.0, Flip::NONE).unwrap();
        let (cx, cy) = (result.width / 2, result.height / 2);
        assert_eq!(result.pixel(cx, cy), Some([90, 120, 200, 255]));
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = RasterImage::filled(1, 1, [128, 128, 128, 255]);
        let result = render_rotated(&img, 45.0, Flip::NONE).unwrap();
        assert!(result.width >= 1);
        assert!(result.height >= 1);
    }

    #[test]
    fn test_fractional_box_centres_on_unrounded_size() {
        // 10x10 at 45° has a 14.142 box drawn on a 14px canvas
        let img = RasterImage::filled(10, 10, [0, 0, 0, 255]);
        assert_eq!(rotated_canvas_size(&img, 45.0), (14, 14));

        let (cx, cy) = canvas_centre(&img, 45.0);
        let half_diagonal = 50f64.sqrt();
        assert!((cx - half_diagonal).abs() < 1e-9);
        assert!((cy - half_diagonal).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_angle_rejected() {
        let img = test_image(10, 10);
        for angle in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                render_rotated(&img, angle, Flip::NONE),
                Err(IdPhotoError::InvalidRotation { .. })
            ));
        }
    }

    #[test]
    fn test_short_buffer_rejected_on_both_paths() {
        let img = RasterImage {
            width: 10,
            height: 10,
            pixels: vec![0; 4],
        };
        for angle in [90.0, 30.0] {
            assert!(matches!(
                render_rotated(&img, angle, Flip::NONE),
                Err(IdPhotoError::MalformedRaster { expected: 400, actual: 4, .. })
            ));
        }
    }

    #[test]
    fn test_rotation_is_deterministic() {
        let img = test_image(25, 40);
        let a = render_rotated(&img, -33.3, Flip::NONE).unwrap();
        let b = render_rotated(&img, -33.3, Flip::NONE).unwrap();
        assert_eq!(a, b);
    }
}
