//! Image encoding for export artifacts.
//!
//! All operations are synchronous; the browser front-end runs them from a
//! worker so the UI stays responsive.
//!
//! # Examples
//!
//! ```ignore
//! use idphoto_core::encode::encode_raster_jpeg;
//! use idphoto_core::Backdrop;
//!
//! let jpeg_bytes = encode_raster_jpeg(&photo, 95, Backdrop::WHITE).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, encode_raster_jpeg, EncodeError};
