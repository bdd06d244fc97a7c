//! Center-crop resize to exact target dimensions.
//!
//! The source is cut down to the target aspect ratio around its center and
//! the remaining window is scaled to the target size. No letterboxing, no
//! distortion.

use std::borrow::Cow;

use super::{resample, Rect};
use crate::buffer::PixelBuffer;
use crate::error::{ImageError, Result};

/// Compute the source window for a crop-resize, or `None` when the source
/// already fits inside the target in both dimensions.
///
/// With `prop_x = target_width / width` and `prop_y = target_height / height`:
///
/// - `prop_x < prop_y`: the source is comparatively wider. A vertical strip
///   of width `ceil(target_width / prop_y)` and full height is taken,
///   horizontally centered.
/// - otherwise (ties included): a horizontal strip of full width and height
///   `ceil(target_height / prop_x)`, vertically centered.
///
/// The strip offset is computed from the unrounded strip size and
/// truncated. The window is clipped to the source.
pub fn crop_window(width: u32, height: u32, target_width: u32, target_height: u32) -> Option<Rect> {
    if width <= target_width && height <= target_height {
        return None;
    }

    // prop_x < prop_y  <=>  tw / w < th / h  <=>  tw * h < th * w
    let wider = (target_width as u64 * height as u64) < (target_height as u64 * width as u64);

    let rect = if wider {
        let strip = target_width as f64 * height as f64 / target_height as f64;
        let x = ((width as f64 - strip) / 2.0).max(0.0);
        Rect::new(x as u32, 0, strip.ceil() as u32, height)
    } else {
        let strip = target_height as f64 * width as f64 / target_width as f64;
        let y = ((height as f64 - strip) / 2.0).max(0.0);
        Rect::new(0, y as u32, width, strip.ceil() as u32)
    };

    Some(rect.clip_to(width, height))
}

/// Crop-resize `source` to exactly `target_width x target_height`.
///
/// Returns the source untouched (`Cow::Borrowed`) when both of its dimensions
/// are already within the target; that case is neither cropped nor scaled.
///
/// # Errors
///
/// `InvalidDimension` if a target dimension is zero.
pub fn crop_resize(
    source: &PixelBuffer,
    target_width: u32,
    target_height: u32,
) -> Result<Cow<'_, PixelBuffer>> {
    if target_width == 0 || target_height == 0 {
        return Err(ImageError::InvalidDimension {
            width: target_width,
            height: target_height,
        });
    }

    let (src_w, src_h) = source.dimensions();
    match crop_window(src_w, src_h, target_width, target_height) {
        None => Ok(Cow::Borrowed(source)),
        Some(window) => resample(source, window, target_width, target_height).map(Cow::Owned),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=5000, 1u32..=5000)
    }

    proptest! {
        /// Property: The crop window lies inside the source and is non-empty.
        #[test]
        fn prop_window_inside_source(
            (width, height) in dimensions_strategy(),
            (tw, th) in dimensions_strategy(),
        ) {
            if let Some(rect) = crop_window(width, height, tw, th) {
                prop_assert!(!rect.is_empty());
                prop_assert!(rect.x + rect.width <= width);
                prop_assert!(rect.y + rect.height <= height);
            } else {
                prop_assert!(width <= tw && height <= th);
            }
        }

        /// Property: The window keeps one full source axis.
        #[test]
        fn prop_window_spans_one_axis(
            (width, height) in dimensions_strategy(),
            (tw, th) in dimensions_strategy(),
        ) {
            if let Some(rect) = crop_window(width, height, tw, th) {
                prop_assert!(
                    (rect.x == 0 && rect.width == width) || (rect.y == 0 && rect.height == height)
                );
            }
        }

        /// Property: Output always matches the target when either source
        /// dimension exceeds it, otherwise the source size is kept.
        #[test]
        fn prop_crop_resize_dimensions(
            width in 1u32..=64,
            height in 1u32..=64,
            tw in 1u32..=64,
            th in 1u32..=64,
        ) {
            let img = PixelBuffer::filled(width, height, [1, 2, 3, 255]).unwrap();
            let out = crop_resize(&img, tw, th).unwrap();

            if width > tw || height > th {
                prop_assert_eq!(out.dimensions(), (tw, th));
            } else {
                prop_assert_eq!(out.dimensions(), (width, height));
            }
        }
    }
}
