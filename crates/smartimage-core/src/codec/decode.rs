//! Decoding through the `image` crate, selected by byte signature.

use std::io::Cursor;

use image::ImageReader;

use super::{estimate_decode_bytes, DecodedImage, ImageFormat};
use crate::buffer::PixelBuffer;
use crate::error::{ImageError, Result};

/// Format and dimensions read from the header alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl ImageHeader {
    /// Estimated bytes needed to fully decode this image.
    pub fn estimated_bytes(&self) -> u64 {
        let (bits, channels) = self.format.pixel_depth();
        estimate_decode_bytes(self.width, self.height, bits, channels)
    }
}

/// Read the format and dimensions without decoding pixel data.
///
/// # Errors
///
/// `UnsupportedFormat` if the signature is not JPEG, GIF or PNG;
/// `Decode` if the header is truncated or malformed.
pub fn read_header(bytes: &[u8]) -> Result<ImageHeader> {
    let format = ImageFormat::sniff(bytes);
    let codec_format = format
        .to_image_format()
        .ok_or(ImageError::UnsupportedFormat)?;

    let (width, height) = ImageReader::with_format(Cursor::new(bytes), codec_format)
        .into_dimensions()
        .map_err(|e| ImageError::Decode(e.to_string()))?;

    log::trace!("read {format} header: {width}x{height}");

    Ok(ImageHeader {
        format,
        width,
        height,
    })
}

/// Decode an encoded image into an RGBA buffer.
///
/// GIF input yields its first frame.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage> {
    let header = read_header(bytes)?;
    decode_with_header(bytes, &header)
}

/// Decode pixel data for a header already obtained from [`read_header`].
pub fn decode_with_header(bytes: &[u8], header: &ImageHeader) -> Result<DecodedImage> {
    let codec_format = header
        .format
        .to_image_format()
        .ok_or(ImageError::UnsupportedFormat)?;

    let img = image::load_from_memory_with_format(bytes, codec_format).map_err(|e| match e {
        image::ImageError::Limits(_) => ImageError::OutOfMemory {
            bytes: header.estimated_bytes(),
        },
        other => ImageError::Decode(other.to_string()),
    })?;

    let buffer = PixelBuffer::from_rgba_image(img.into_rgba8())?;
    Ok(DecodedImage {
        buffer,
        format: header.format,
    })
}
