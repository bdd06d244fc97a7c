//! Resize to fit inside a bounding box, downscaling only.

use super::{resample, Rect};
use crate::buffer::PixelBuffer;
use crate::error::{ImageError, Result};

/// Compute the dimensions of `width x height` fitted into `max_width x max_height`.
///
/// The two constraints are applied one after the other, not simultaneously:
///
/// 1. If the width exceeds `max_width`, the height is scaled by
///    `max_width / width` and the width becomes `max_width`.
/// 2. If the height *after step 1* still exceeds `max_height`, the width
///    (whatever step 1 left) is scaled by `max_height / height` and the
///    height becomes `max_height`.
///
/// Intermediate values stay fractional; the result is truncated. A result of
/// zero is possible for extreme aspect ratios and is rejected by
/// [`fit_resize`].
///
/// # Example
///
/// ```
/// use smartimage_core::geometry::fit_dimensions;
///
/// assert_eq!(fit_dimensions(1920, 1080, 1280, 1280), (1280, 720));
/// assert_eq!(fit_dimensions(100, 400, 200, 200), (50, 200));
/// assert_eq!(fit_dimensions(100, 50, 200, 200), (100, 50));
/// ```
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let mut w = width as f64;
    let mut h = height as f64;
    let max_w = max_width as f64;
    let max_h = max_height as f64;

    if w > max_w {
        h = h * max_w / w;
        w = max_w;
    }
    if h > max_h {
        w = w * max_h / h;
        h = max_h;
    }

    (w as u32, h as u32)
}

/// Resample `source` so it fits within `max_width x max_height`.
///
/// A fresh buffer is produced even when the image already fits.
///
/// # Errors
///
/// `InvalidDimension` if a bound is zero, `ResampleFailure` if the fitted
/// size truncates to zero.
pub fn fit_resize(source: &PixelBuffer, max_width: u32, max_height: u32) -> Result<PixelBuffer> {
    if max_width == 0 || max_height == 0 {
        return Err(ImageError::InvalidDimension {
            width: max_width,
            height: max_height,
        });
    }

    let (src_w, src_h) = source.dimensions();
    let (new_w, new_h) = fit_dimensions(src_w, src_h, max_width, max_height);

    resample(source, Rect::full(src_w, src_h), new_w, new_h)
}
