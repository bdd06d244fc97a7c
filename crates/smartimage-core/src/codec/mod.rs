//! Codec boundary: bytes in, [`PixelBuffer`] out, and back.
//!
//! The transform core only talks to the [`Codec`] trait. [`ImageCodec`] is
//! the implementation shipped with the crate and is backed by the `image`
//! crate's pure Rust decoders and encoders.
//!
//! | Format | Decode | Encode | Alpha | Quality |
//! |---|---|---|---|---|
//! | JPEG | yes | yes | no | 1-100 |
//! | GIF | first frame | yes | palette | ignored |
//! | PNG | yes | yes | yes | ignored |
//!
//! The decoder is chosen by the byte signature of the input. File extensions
//! only matter when encoding to a path (see [`ImageFormat::from_path`]).

mod budget;
mod decode;
mod encode;
mod format;

pub use budget::{estimate_decode_bytes, FixedBudget, MemoryBudget, Unbounded};
pub use decode::{decode, decode_with_header, read_header, ImageHeader};
pub use encode::encode;
pub use format::ImageFormat;

use crate::buffer::PixelBuffer;
use crate::error::Result;

/// A decoded raster together with the format it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub buffer: PixelBuffer,
    pub format: ImageFormat,
}

/// Decode/encode capability for the supported formats.
pub trait Codec {
    /// Inspect format and dimensions without decoding pixels.
    fn read_header(&self, bytes: &[u8]) -> Result<ImageHeader>;

    /// Decode pixel data for a header this codec already read.
    fn decode_image(&self, bytes: &[u8], header: &ImageHeader) -> Result<DecodedImage>;

    /// Decode bytes; fails with `UnsupportedFormat` on unknown signatures.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage> {
        let header = self.read_header(bytes)?;
        self.decode_image(bytes, &header)
    }

    /// Encode a buffer. `quality` only matters for lossy formats.
    fn encode(&self, buffer: &PixelBuffer, format: ImageFormat, quality: u8) -> Result<Vec<u8>>;
}

/// The default codec, backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl Codec for ImageCodec {
    fn read_header(&self, bytes: &[u8]) -> Result<ImageHeader> {
        read_header(bytes)
    }

    fn decode_image(&self, bytes: &[u8], header: &ImageHeader) -> Result<DecodedImage> {
        decode_with_header(bytes, header)
    }

    fn encode(&self, buffer: &PixelBuffer, format: ImageFormat, quality: u8) -> Result<Vec<u8>> {
        encode(buffer, format, quality)
    }
}
