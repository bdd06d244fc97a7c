//! Resampling copy of a source rectangle into a new raster.
//!
//! The window is cut out with `imageops::crop_imm` and scaled with
//! `imageops::resize`. Windows that already have the destination size are
//! copied without filtering.

use image::imageops::{self, FilterType};

use super::Rect;
use crate::buffer::PixelBuffer;
use crate::error::{ImageError, Result};

/// Filter used for every resize. Triangle averages the covered source pixels
/// when downscaling and interpolates linearly when upscaling.
const RESAMPLE_FILTER: FilterType = FilterType::Triangle;

/// Resample `src_rect` of `source` into a new `dst_width x dst_height` buffer.
///
/// The rectangle is clipped to the source first.
///
/// # Errors
///
/// `ResampleFailure` if the clipped source rectangle or the destination has
/// zero area.
pub fn resample(
    source: &PixelBuffer,
    src_rect: Rect,
    dst_width: u32,
    dst_height: u32,
) -> Result<PixelBuffer> {
    let rect = src_rect.clip_to(source.width(), source.height());
    if rect.is_empty() {
        return Err(ImageError::ResampleFailure(format!(
            "source rectangle {src_rect:?} has no area inside {}x{}",
            source.width(),
            source.height()
        )));
    }
    if dst_width == 0 || dst_height == 0 {
        return Err(ImageError::ResampleFailure(format!(
            "destination {dst_width}x{dst_height} has no area"
        )));
    }

    let window = imageops::crop_imm(
        source.as_rgba_image(),
        rect.x,
        rect.y,
        rect.width,
        rect.height,
    )
    .to_image();

    // Fast path: same size, plain copy
    if (rect.width, rect.height) == (dst_width, dst_height) {
        return PixelBuffer::from_rgba_image(window);
    }

    let resized = imageops::resize(&window, dst_width, dst_height, RESAMPLE_FILTER);
    PixelBuffer::from_rgba_image(resized)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Left half white, right half black.
    fn split(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::filled(width, height, [0, 0, 0, 255]).unwrap();
        for y in 0..height {
            for x in 0..width / 2 {
                buf.put_pixel(x, y, [255, 255, 255, 255]);
            }
        }
        buf
    }

    #[test]
    fn test_identity_copy() {
        let img = split(8, 6);
        let out = resample(&img, Rect::full(8, 6), 8, 6).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_same_size_window_is_exact() {
        let img = split(8, 6);
        let out = resample(&img, Rect::new(2, 1, 4, 4), 4, 4).unwrap();

        assert_eq!(out.dimensions(), (4, 4));
        assert_eq!(out.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(out.pixel(1, 3), Some([255, 255, 255, 255]));
        assert_eq!(out.pixel(2, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_downscale_keeps_halves() {
        let img = split(16, 16);
        let out = resample(&img, Rect::full(16, 16), 4, 4).unwrap();

        assert_eq!(out.dimensions(), (4, 4));
        for y in 0..4 {
            // Outer columns only see one side of the split
            assert_eq!(out.pixel(0, y), Some([255, 255, 255, 255]));
            assert_eq!(out.pixel(3, y), Some([0, 0, 0, 255]));
            // Inner columns straddle it and land in between
            let left = out.pixel(1, y).unwrap()[0];
            let right = out.pixel(2, y).unwrap()[0];
            assert!(left > right, "{left} <= {right}");
        }
    }

    #[test]
    fn test_sub_rectangle() {
        let mut img = PixelBuffer::filled(10, 10, [0, 0, 0, 255]).unwrap();
        for y in 5..10 {
            for x in 5..10 {
                img.put_pixel(x, y, [255, 0, 0, 255]);
            }
        }

        let out = resample(&img, Rect::new(5, 5, 5, 5), 2, 2).unwrap();
        for chunk in out.as_bytes().chunks_exact(4) {
            assert_eq!(chunk, &[255, 0, 0, 255]);
        }
    }

    #[test]
    fn test_upscale() {
        let img = PixelBuffer::filled(2, 2, [10, 20, 30, 255]).unwrap();
        let out = resample(&img, Rect::full(2, 2), 7, 5).unwrap();

        assert_eq!(out.dimensions(), (7, 5));
        assert_eq!(out.pixel(6, 4), Some([10, 20, 30, 255]));
    }

    #[test]
    fn test_rect_is_clipped() {
        let img = split(8, 8);
        let out = resample(&img, Rect::new(4, 0, 100, 8), 2, 2).unwrap();
        for chunk in out.as_bytes().chunks_exact(4) {
            assert_eq!(chunk, &[0, 0, 0, 255]);
        }
    }

    #[test]
    fn test_empty_rect_fails() {
        let img = split(4, 4);
        let result = resample(&img, Rect::new(0, 0, 0, 4), 2, 2);
        assert!(matches!(result, Err(ImageError::ResampleFailure(_))));

        let result = resample(&img, Rect::new(10, 10, 4, 4), 2, 2);
        assert!(matches!(result, Err(ImageError::ResampleFailure(_))));
    }

    #[test]
    fn test_zero_destination_fails() {
        let img = split(4, 4);
        let result = resample(&img, Rect::full(4, 4), 0, 2);
        assert!(matches!(result, Err(ImageError::ResampleFailure(_))));
    }
}
