//! SmartImage Core - fit/crop resizing, rotation and watermarking
//!
//! This crate decodes JPEG, GIF and PNG images into an owned RGBA raster,
//! transforms it, and encodes the result again.
//!
//! # Pipeline
//!
//! 1. Decode: [`ImageHandle::from_bytes`] / [`ImageHandle::open`], codec
//!    chosen by byte signature
//! 2. Transform: [`ImageHandle::resize`] ([`ResizeMode::Fit`] or
//!    [`ResizeMode::Crop`]), [`ImageHandle::rotate`],
//!    [`ImageHandle::watermark`]
//! 3. Encode: [`ImageHandle::encode`] (decoded format, with MIME type) or
//!    [`ImageHandle::encode_to_file`] (format from the file extension)
//!
//! # Examples
//!
//! ```ignore
//! use smartimage_core::{ImageHandle, ResizeMode, WatermarkOptions};
//!
//! let mut image = ImageHandle::open("photo.jpg")?;
//! image.resize(400, 400, ResizeMode::Crop)?;
//! image.watermark_from_path("logo.png", WatermarkOptions::default())?;
//! image.encode_to_file("thumb.jpg", 85)?;
//! image.close();
//! ```

pub mod buffer;
pub mod codec;
pub mod composite;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod ops;

pub use buffer::PixelBuffer;
pub use codec::{Codec, ImageCodec, ImageFormat};
pub use composite::{overlay, BlendPolicy};
pub use error::{ImageError, Result};
pub use handle::{EncodedImage, ImageHandle, ImageMetadata};
pub use ops::{EncodeOptions, Operation, ResizeMode, WatermarkOptions};
