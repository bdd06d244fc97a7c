//! Encoding to JPEG, GIF and PNG.
//!
//! Only the JPEG encoder takes a quality setting. The other two accept it and
//! ignore it.

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, Frame, ImageEncoder};

use super::ImageFormat;
use crate::buffer::{allocate, PixelBuffer, CHANNELS};
use crate::error::{ImageError, Result};

/// Encode a buffer in the given format.
///
/// `Unknown` is written as JPEG. `quality` is clamped to 1..=100.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 60-80: Medium quality, acceptable for web
/// * Below 60: Low quality, visible artifacts
pub fn encode(buffer: &PixelBuffer, format: ImageFormat, quality: u8) -> Result<Vec<u8>> {
    let (width, height) = buffer.dimensions();
    let mut out = Vec::new();

    match format.output_format() {
        ImageFormat::Png => PngEncoder::new(&mut out)
            .write_image(buffer.as_bytes(), width, height, ExtendedColorType::Rgba8)
            .map_err(|e| ImageError::Encode(e.to_string()))?,
        ImageFormat::Gif => {
            let mut encoder = GifEncoder::new(&mut out);
            encoder
                .encode_frame(Frame::new(buffer.as_rgba_image().clone()))
                .map_err(|e| ImageError::Encode(e.to_string()))?;
        }
        _ => {
            let rgb = strip_alpha(buffer)?;
            JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(|e| ImageError::Encode(e.to_string()))?;
        }
    }

    Ok(out)
}

/// Drop the alpha channel for encoders that have none.
fn strip_alpha(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let mut rgb = allocate(buffer.pixel_count() as usize * 3)?;
    for (dst, src) in rgb
        .chunks_exact_mut(3)
        .zip(buffer.as_bytes().chunks_exact(CHANNELS))
    {
        dst.copy_from_slice(&src[..3]);
    }
    Ok(rgb)
}
