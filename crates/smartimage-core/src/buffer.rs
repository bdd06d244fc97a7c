//! The owned RGBA raster every transform reads and writes.

use image::{Rgba, RgbaImage};

use crate::error::{ImageError, Result};

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// An owned RGBA8 raster in row-major order.
///
/// Backed by an `image::RgbaImage` whose dimensions are both non-zero. The
/// field is private so that invariant holds for every value of this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Wrap existing RGBA pixel data.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` if either dimension is zero, `InvalidPixelData` if
    /// the length doesn't match.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height)?;
        let actual = pixels.len();
        RgbaImage::from_raw(width, height, pixels)
            .filter(|_| actual == expected)
            .map(|image| Self { image })
            .ok_or(ImageError::InvalidPixelData { expected, actual })
    }

    /// Allocate a buffer filled with a single color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let mut pixels = allocate(byte_len(width, height)?)?;
        for chunk in pixels.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&rgba);
        }
        Self::new(width, height, pixels)
    }

    /// Allocate a fully transparent buffer.
    pub fn transparent(width: u32, height: u32) -> Result<Self> {
        let pixels = allocate(byte_len(width, height)?)?;
        Self::new(width, height, pixels)
    }

    /// Take ownership of an `image::RgbaImage`.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` for an empty image.
    pub fn from_rgba_image(image: RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        byte_len(width, height)?;
        Ok(Self { image })
    }

    /// Borrow as an `image::RgbaImage` for `imageops` and the encoders.
    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_rgba_image(self) -> RgbaImage {
        self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.image.into_raw()
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Byte offset of pixel `(x, y)`. Caller guarantees bounds.
    #[inline]
    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width() as usize + x as usize) * CHANNELS
    }

    /// Read the pixel at `(x, y)`, or `None` when outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|px| px.0)
    }

    /// Write the pixel at `(x, y)`. Writes outside the raster are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(px) = self.image.get_pixel_mut_checked(x, y) {
            *px = Rgba(rgba);
        }
    }
}

/// Number of bytes for a `width x height` RGBA raster.
pub(crate) fn byte_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(ImageError::OutOfMemory {
            bytes: width as u64 * height as u64 * CHANNELS as u64,
        })
}

/// Zeroed allocation that reports failure instead of aborting.
pub(crate) fn allocate(len: usize) -> Result<Vec<u8>> {
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|_| ImageError::OutOfMemory { bytes: len as u64 })?;
    pixels.resize(len, 0);
    Ok(pixels)
}
