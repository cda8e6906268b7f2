//! Bitmap decoding (JPEG, PNG) with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;
use tracing::debug;

use super::{DecodeError, Orientation, RasterImage};

/// Decode an uploaded photo from bytes, applying EXIF orientation correction.
///
/// Phone cameras usually store pixels in sensor order and record the
/// intended orientation in EXIF, so the correction happens here before any
/// crop geometry is computed against the image.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized,
/// `DecodeError::CorruptedFile` if decoding fails part-way, and
/// `DecodeError::UnsupportedDimensions` for a zero-sized image.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let orientation = read_orientation(bytes);
    let rgba = make_upright(decode_dynamic(bytes)?, orientation).into_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::UnsupportedDimensions { width, height });
    }

    debug!(width, height, ?orientation, "Decoded source image");
    Ok(RasterImage::from_rgba_image(rgba))
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Upright when there is no EXIF block or no orientation tag.
fn read_orientation(bytes: &[u8]) -> Orientation {
    Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn make_upright(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Upright => img,
        Orientation::Mirrored => img.fliph(),
        Orientation::UpsideDown => img.rotate180(),
        Orientation::UpsideDownMirrored => img.flipv(),
        Orientation::QuarterCwMirrored => img.rotate90().fliph(),
        Orientation::QuarterCw => img.rotate90(),
        Orientation::QuarterCcwMirrored => img.rotate270().fliph(),
        Orientation::QuarterCcw => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_jpeg;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let rgb = vec![90u8; (width * height * 3) as usize];
        encode_jpeg(&rgb, width, height, 90).unwrap()
    }

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_jpeg_is_opaque() {
        let img = decode_image(&jpeg_bytes(6, 4)).unwrap();
        assert_eq!((img.width, img.height), (6, 4));
        assert_eq!(img.pixels.len(), 6 * 4 * 4);
        assert!(img.is_opaque());
    }

    #[test]
    fn test_decode_png_keeps_alpha() {
        let mut src = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        src.put_pixel(2, 1, Rgba([0, 0, 0, 0]));

        let img = decode_image(&png_bytes(&src)).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(img.pixel(0, 0), Some([10, 20, 30, 255]));
        assert_eq!(img.pixel(2, 1).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_decode_unrecognized_bytes() {
        let result = decode_image(b"not an image at all");
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let bytes = jpeg_bytes(16, 16);
        let result = decode_image(&bytes[..24]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_missing_exif_reads_upright() {
        assert_eq!(read_orientation(&jpeg_bytes(2, 2)), Orientation::Upright);
        assert_eq!(read_orientation(&[0x00, 0x01, 0x02]), Orientation::Upright);
    }

    fn red_then_green() -> DynamicImage {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_quarter_turn_clockwise() {
        let result = make_upright(red_then_green(), Orientation::QuarterCw).into_rgba8();
        assert_eq!(result.dimensions(), (1, 2));
        // Left pixel ends up on top after a clockwise quarter turn
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_upside_down() {
        let result = make_upright(red_then_green(), Orientation::UpsideDown).into_rgba8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_mirrored_keeps_size() {
        let result = make_upright(red_then_green(), Orientation::Mirrored).into_rgba8();
        assert_eq!(result.dimensions(), (2, 1));
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0, 255]);
    }
}
