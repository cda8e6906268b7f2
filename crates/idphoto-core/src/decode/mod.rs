//! Image decoding for uploaded photos.
//!
//! Any bitmap format enabled on the `image` crate (JPEG and PNG) is decoded
//! to an RGBA [`RasterImage`]. EXIF orientation is applied so that crop
//! coordinates coming back from the UI refer to the upright image.
//!
//! # Examples
//!
//! ```ignore
//! use idphoto_core::decode::decode_image;
//!
//! let bytes = std::fs::read("selfie.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod bitmap;
mod types;

pub use bitmap::decode_image;
pub use types::{DecodeError, Orientation, RasterImage};
