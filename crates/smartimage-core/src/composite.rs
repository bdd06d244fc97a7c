//! Watermark compositing.
//!
//! The blend policy depends on the watermark's own format:
//!
//! - **Alpha-capable (PNG)**: the watermark's pixels are copied over the
//!   destination as they are. Opacity is ignored; any transparency has to be
//!   authored into the watermark file itself.
//! - **Everything else**: each color channel in the footprint becomes
//!   `opacity% * watermark + (100 - opacity)% * destination`. Fully
//!   transparent watermark pixels (a GIF's transparent color) are skipped and
//!   the destination keeps its own alpha.
//!
//! Parts of the watermark that fall outside the base image are clipped
//! silently.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::codec::ImageFormat;
use crate::error::{ImageError, Result};

/// How watermark pixels are combined with the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendPolicy {
    /// Overwrite destination pixels.
    Replace,
    /// Weighted mix, opacity in percent.
    Merge { opacity: u8 },
}

impl BlendPolicy {
    /// Pick the policy for a watermark of `format`.
    ///
    /// # Errors
    ///
    /// `InvalidOpacity` if `opacity` is outside 0..=100, whatever the format.
    pub fn for_format(format: ImageFormat, opacity: i32) -> Result<Self> {
        let opacity = u8::try_from(opacity)
            .ok()
            .filter(|o| *o <= 100)
            .ok_or(ImageError::InvalidOpacity(opacity))?;

        if format.has_alpha() {
            Ok(BlendPolicy::Replace)
        } else {
            Ok(BlendPolicy::Merge { opacity })
        }
    }
}

/// Overlay `mark` onto `base` with its top-left corner at `(x, y)`.
///
/// `mark` is only read. Negative offsets and overhangs are clipped.
pub fn overlay(
    base: &mut PixelBuffer,
    mark: &PixelBuffer,
    mark_format: ImageFormat,
    x: i32,
    y: i32,
    opacity: i32,
) -> Result<()> {
    let policy = BlendPolicy::for_format(mark_format, opacity)?;

    let (base_w, base_h) = (base.width() as i64, base.height() as i64);
    let (mark_w, mark_h) = (mark.width() as i64, mark.height() as i64);
    let (x, y) = (x as i64, y as i64);

    // Footprint in base coordinates, clipped on all four sides
    let left = x.max(0);
    let top = y.max(0);
    let right = (x + mark_w).min(base_w);
    let bottom = (y + mark_h).min(base_h);

    if left >= right || top >= bottom {
        log::trace!("watermark at ({x}, {y}) lies outside {base_w}x{base_h}");
        return Ok(());
    }

    let row_len = (right - left) as usize * CHANNELS;
    let mark_bytes = mark.as_bytes();

    for dst_y in top..bottom {
        let src_y = dst_y - y;
        let src_start = mark.offset((left - x) as u32, src_y as u32);
        let dst_start = base.offset(left as u32, dst_y as u32);

        let src_row = &mark_bytes[src_start..src_start + row_len];
        let dst_row = &mut base.as_bytes_mut()[dst_start..dst_start + row_len];

        match policy {
            BlendPolicy::Replace => dst_row.copy_from_slice(src_row),
            BlendPolicy::Merge { opacity } => merge_row(dst_row, src_row, opacity),
        }
    }

    Ok(())
}

/// `dst = (src * opacity + dst * (100 - opacity)) / 100` on R, G and B,
/// rounded. Source pixels with zero alpha leave `dst` as it is.
fn merge_row(dst: &mut [u8], src: &[u8], opacity: u8) {
    let op = opacity as u32;
    let inv = 100 - op;
    for (d, s) in dst.chunks_exact_mut(CHANNELS).zip(src.chunks_exact(CHANNELS)) {
        if s[3] == 0 {
            continue;
        }
        for (dc, sc) in d[..3].iter_mut().zip(&s[..3]) {
            *dc = ((*sc as u32 * op + *dc as u32 * inv + 50) / 100) as u8;
        }
    }
}
