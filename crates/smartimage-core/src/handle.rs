//! The image handle: one owned raster, its metadata, and the public
//! operations.
//!
//! Every mutating call builds the replacement raster first and installs it
//! with a single assignment, which drops the superseded raster. On error the
//! handle is left exactly as it was.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::Serialize;

use crate::buffer::PixelBuffer;
use crate::codec::{Codec, ImageCodec, ImageFormat, MemoryBudget, Unbounded};
use crate::composite::overlay;
use crate::error::{ImageError, Result};
use crate::geometry::{crop_resize, fit_resize, rotate, DEFAULT_ROTATION};
use crate::ops::{EncodeOptions, Operation, ResizeMode, WatermarkOptions};

/// Format and current size of the image held by a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageMetadata {
    /// Format the image was decoded from.
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

/// Result of an in-memory encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    /// Content type to send along with `bytes`.
    pub mime: &'static str,
}

/// An image being transformed.
#[derive(Debug, Clone)]
pub struct ImageHandle<C = ImageCodec> {
    buffer: PixelBuffer,
    metadata: ImageMetadata,
    codec: C,
}

impl ImageHandle<ImageCodec> {
    /// Decode an image from bytes using the built-in codec.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode_with(ImageCodec, bytes, None, &Unbounded)
    }

    /// Decode with a format hint.
    ///
    /// The byte signature always decides the decoder. A hint that disagrees
    /// with it is logged and otherwise ignored.
    pub fn from_bytes_with_hint(bytes: &[u8], hint: Option<ImageFormat>) -> Result<Self> {
        Self::decode_with(ImageCodec, bytes, hint, &Unbounded)
    }

    /// Decode only if `budget` allows the estimated memory for this image.
    pub fn from_bytes_with_budget(bytes: &[u8], budget: &dyn MemoryBudget) -> Result<Self> {
        Self::decode_with(ImageCodec, bytes, None, budget)
    }

    /// Read and decode a file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Wrap an existing raster.
    pub fn from_buffer(buffer: PixelBuffer, format: ImageFormat) -> Self {
        Self::from_buffer_with(ImageCodec, buffer, format)
    }
}

impl<C: Codec> ImageHandle<C> {
    /// Decode `bytes` with a custom codec.
    pub fn decode_with(
        codec: C,
        bytes: &[u8],
        hint: Option<ImageFormat>,
        budget: &dyn MemoryBudget,
    ) -> Result<Self> {
        let header = codec.read_header(bytes)?;
        let needed = header.estimated_bytes();
        if !budget.can_allocate(needed) {
            return Err(ImageError::OutOfMemory { bytes: needed });
        }

        let decoded = codec.decode_image(bytes, &header)?;
        if let Some(hint) = hint.filter(|h| *h != decoded.format) {
            warn!(
                "format hint {hint} does not match signature {}, decoding as {}",
                decoded.format, decoded.format
            );
        }

        debug!(
            "decoded {} image {}x{}",
            decoded.format,
            decoded.buffer.width(),
            decoded.buffer.height()
        );
        Ok(Self::from_buffer_with(codec, decoded.buffer, decoded.format))
    }

    /// Wrap an existing raster with a custom codec.
    pub fn from_buffer_with(codec: C, buffer: PixelBuffer, format: ImageFormat) -> Self {
        let (width, height) = buffer.dimensions();
        Self {
            buffer,
            metadata: ImageMetadata {
                format,
                width,
                height,
            },
            codec,
        }
    }

    /// `(width, height)` of the current image.
    pub fn size(&self) -> (u32, u32) {
        (self.metadata.width, self.metadata.height)
    }

    pub fn metadata(&self) -> &ImageMetadata {
        &self.metadata
    }

    /// Format the image was decoded from.
    pub fn format(&self) -> ImageFormat {
        self.metadata.format
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Replace the raster. The previous one is dropped.
    pub fn set_buffer(&mut self, buffer: PixelBuffer) {
        self.replace_buffer(buffer);
    }

    /// Take the raster out, consuming the handle.
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    /// Resize with the given mode.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` for a zero target, `ResampleFailure` or
    /// `OutOfMemory` from the resampling copy. The handle is unchanged on
    /// error.
    pub fn resize(&mut self, width: u32, height: u32, mode: ResizeMode) -> Result<()> {
        let next = match mode {
            ResizeMode::Fit => fit_resize(&self.buffer, width, height)?,
            ResizeMode::Crop => match crop_resize(&self.buffer, width, height)? {
                Cow::Borrowed(_) => {
                    debug!(
                        "crop to {width}x{height} skipped, image is {}x{}",
                        self.metadata.width, self.metadata.height
                    );
                    return Ok(());
                }
                Cow::Owned(buffer) => buffer,
            },
        };
        self.replace_buffer(next);
        Ok(())
    }

    /// Rotate counter-clockwise by `degrees`.
    pub fn rotate(&mut self, degrees: f64) -> Result<()> {
        let next = rotate(&self.buffer, degrees)?;
        self.replace_buffer(next);
        Ok(())
    }

    /// Rotate by 180°.
    pub fn rotate_default(&mut self) -> Result<()> {
        self.rotate(DEFAULT_ROTATION)
    }

    /// Overlay another image. `mark` is only read.
    pub fn watermark<D: Codec>(
        &mut self,
        mark: &ImageHandle<D>,
        options: WatermarkOptions,
    ) -> Result<()> {
        self.overlay_buffer(&mark.buffer, mark.metadata.format, options)
    }

    /// Decode a watermark from bytes and overlay it. The watermark is
    /// released before returning.
    pub fn watermark_from_bytes(&mut self, bytes: &[u8], options: WatermarkOptions) -> Result<()> {
        let mark = self.codec.decode(bytes)?;
        self.overlay_buffer(&mark.buffer, mark.format, options)
    }

    /// Read a watermark file and overlay it.
    pub fn watermark_from_path(
        &mut self,
        path: impl AsRef<Path>,
        options: WatermarkOptions,
    ) -> Result<()> {
        let bytes = fs::read(path.as_ref())?;
        self.watermark_from_bytes(&bytes, options)
    }

    /// Encode in the decoded format for in-memory output.
    ///
    /// Handles of `Unknown` format are written as JPEG.
    pub fn encode(&self, quality: u8) -> Result<EncodedImage> {
        let format = self.metadata.format.output_format();
        let bytes = self.codec.encode(&self.buffer, format, quality)?;
        Ok(EncodedImage {
            bytes,
            format,
            mime: format.mime_type(),
        })
    }

    /// [`encode`](Self::encode) with settings from configuration.
    pub fn encode_with(&self, options: EncodeOptions) -> Result<EncodedImage> {
        self.encode(options.quality)
    }

    /// Encode and write to `path`, choosing the format from its extension.
    ///
    /// Returns the format that was written.
    pub fn encode_to_file(&self, path: impl AsRef<Path>, quality: u8) -> Result<ImageFormat> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path);
        let bytes = self.codec.encode(&self.buffer, format, quality)?;
        fs::write(path, bytes)?;
        debug!("wrote {format} image to {}", path.display());
        Ok(format)
    }

    /// Run a pipeline of operations in order, stopping at the first error.
    pub fn apply(&mut self, operations: &[Operation]) -> Result<()> {
        for operation in operations {
            match operation {
                Operation::Resize {
                    width,
                    height,
                    mode,
                } => self.resize(*width, *height, *mode)?,
                Operation::Rotate { degrees } => self.rotate(*degrees)?,
                Operation::Watermark { path, options } => {
                    self.watermark_from_path(path, *options)?
                }
            }
        }
        Ok(())
    }

    /// Release the image.
    pub fn close(self) {
        debug!(
            "closing {}x{} image",
            self.metadata.width, self.metadata.height
        );
    }

    fn overlay_buffer(
        &mut self,
        mark: &PixelBuffer,
        mark_format: ImageFormat,
        options: WatermarkOptions,
    ) -> Result<()> {
        overlay(
            &mut self.buffer,
            mark,
            mark_format,
            options.x,
            options.y,
            options.opacity,
        )?;
        self.refresh_metadata();
        Ok(())
    }

    fn replace_buffer(&mut self, next: PixelBuffer) {
        debug!(
            "replacing {}x{} buffer with {}x{}",
            self.metadata.width,
            self.metadata.height,
            next.width(),
            next.height()
        );
        self.buffer = next;
        self.refresh_metadata();
    }

    fn refresh_metadata(&mut self) {
        let (width, height) = self.buffer.dimensions();
        self.metadata.width = width;
        self.metadata.height = height;
    }
}
