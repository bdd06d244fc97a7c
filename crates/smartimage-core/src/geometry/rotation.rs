//! Rotation around the image center.
//!
//! Quarter turns (multiples of 90°) are exact pixel permutations. Any other
//! angle uses inverse mapping: for each pixel in the output we calculate
//! where it came from in the source and sample bilinearly.
//!
//! ```text
//! src_x = (dst_x - cx) * cos(-θ) - (dst_y - cy) * sin(-θ) + src_cx
//! src_y = (dst_x - cx) * sin(-θ) + (dst_y - cy) * cos(-θ) + src_cy
//! ```
//!
//! Positive angles rotate counter-clockwise. The canvas grows to the rotated
//! bounding box and uncovered corners are fully transparent.

use image::imageops;

use crate::buffer::PixelBuffer;
use crate::error::Result;

/// Default rotation when none is given.
pub const DEFAULT_ROTATION: f64 = 180.0;

/// Tolerance for treating an angle as an exact quarter turn.
const ANGLE_EPSILON: f64 = 0.001;

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Number of counter-clockwise quarter turns if `angle_degrees` is a
/// multiple of 90°.
fn quarter_turns(angle_degrees: f64) -> Option<u8> {
    let normalized = angle_degrees.rem_euclid(360.0);
    let turns = (normalized / 90.0).round();
    if (normalized - turns * 90.0).abs() < ANGLE_EPSILON {
        Some((turns as u8) % 4)
    } else {
        None
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// # Example
///
/// ```
/// use smartimage_core::geometry::rotated_bounds;
///
/// assert_eq!(rotated_bounds(100, 50, 90.0), (50, 100));
/// assert_eq!(rotated_bounds(100, 50, 180.0), (100, 50));
/// ```
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turns(angle_degrees) {
        Some(0 | 2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // new_w = |w*cos| + |h*sin|, new_h = |w*sin| + |h*cos|
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate `image` by `angle_degrees` counter-clockwise into a new buffer.
pub fn rotate(image: &PixelBuffer, angle_degrees: f64) -> Result<PixelBuffer> {
    match quarter_turns(angle_degrees) {
        Some(0) => Ok(image.clone()),
        Some(turns) => rotate_quarter(image, turns),
        None => rotate_bilinear(image, angle_degrees),
    }
}

/// Exact rotation by 90°, 180° or 270° counter-clockwise.
///
/// `imageops` turns clockwise, so a counter-clockwise quarter turn is its
/// `rotate270`.
fn rotate_quarter(image: &PixelBuffer, turns: u8) -> Result<PixelBuffer> {
    let source = image.as_rgba_image();
    let rotated = match turns {
        1 => imageops::rotate270(source),
        2 => imageops::rotate180(source),
        _ => imageops::rotate90(source),
    };
    PixelBuffer::from_rgba_image(rotated)
}

fn rotate_bilinear(image: &PixelBuffer, angle_degrees: f64) -> Result<PixelBuffer> {
    let (src_w, src_h) = (image.width() as f64, image.height() as f64);
    let (dst_w, dst_h) = rotated_bounds(image.width(), image.height(), angle_degrees);

    // Screen coordinates have y pointing down, so a counter-clockwise visual
    // rotation uses the unnegated angle in the inverse map.
    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = PixelBuffer::transparent(dst_w, dst_h)?;

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Pixel centers, translated to the origin
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos - dy * sin + src_cx - 0.5;
            let src_y = dx * sin + dy * cos + src_cy - 0.5;

            output.put_pixel(dst_x, dst_y, sample_bilinear(image, src_x, src_y));
        }
    }

    Ok(output)
}

#[inline]
fn get_pixel_f64(image: &PixelBuffer, px: u32, py: u32) -> [f64; 4] {
    let idx = image.offset(px, py);
    let bytes = image.as_bytes();
    [
        bytes[idx] as f64,
        bytes[idx + 1] as f64,
        bytes[idx + 2] as f64,
        bytes[idx + 3] as f64,
    ]
}

/// Sample a pixel using bilinear interpolation, transparent outside.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (image.width() as f64, image.height() as f64);

    if x < -0.5 || x > w - 0.5 || y < -0.5 || y > h - 0.5 {
        return TRANSPARENT;
    }

    let x = x.clamp(0.0, w - 1.0);
    let y = y.clamp(0.0, h - 1.0);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width() - 1);
    let y1 = (y0 + 1).min(image.height() - 1);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each pixel gets a unique value based on position.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::transparent(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                buf.put_pixel(x, y, [x as u8, y as u8, ((x + y) * 8) as u8, 255]);
            }
        }
        buf
    }

    #[test]
    fn test_180_maps_pixels() {
        let img = test_image(6, 4);
        let out = rotate(&img, 180.0).unwrap();

        assert_eq!(out.dimensions(), (6, 4));
        for y in 0..4 {
            for x in 0..6 {
                assert_eq!(out.pixel(x, y), img.pixel(6 - 1 - x, 4 - 1 - y));
            }
        }
    }

    #[test]
    fn test_90_counter_clockwise() {
        let img = test_image(3, 2);
        let out = rotate(&img, 90.0).unwrap();

        assert_eq!(out.dimensions(), (2, 3));
        // Top-right corner moves to top-left
        assert_eq!(out.pixel(0, 0), img.pixel(2, 0));
        // Top-left corner moves to bottom-left
        assert_eq!(out.pixel(0, 2), img.pixel(0, 0));
    }

    #[test]
    fn test_270_is_inverse_of_90() {
        let img = test_image(5, 3);
        let there = rotate(&img, 90.0).unwrap();
        let back = rotate(&there, 270.0).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_negative_quarter_turn() {
        let img = test_image(5, 3);
        assert_eq!(rotate(&img, -90.0).unwrap(), rotate(&img, 270.0).unwrap());
    }

    #[test]
    fn test_full_rotation_is_copy() {
        let img = test_image(5, 3);
        assert_eq!(rotate(&img, 360.0).unwrap(), img);
        assert_eq!(rotate(&img, 720.0).unwrap(), img);
    }

    #[test]
    fn test_rotated_bounds_quarter_turns() {
        assert_eq!(rotated_bounds(100, 50, 90.0), (50, 100));
        assert_eq!(rotated_bounds(100, 50, 270.0), (50, 100));
        assert_eq!(rotated_bounds(100, 50, 450.0), (50, 100));
        assert_eq!(rotated_bounds(100, 50, 180.0), (100, 50));
        assert_eq!(rotated_bounds(100, 50, 0.0), (100, 50));
    }

    #[test]
    fn test_45_degree_bounds() {
        let (w, h) = rotated_bounds(100, 100, 45.0);
        // Diagonal of 100x100 square is ~141.4
        assert!(w > 140 && w < 143, "width was {}", w);
        assert!(h > 140 && h < 143, "height was {}", h);
    }

    #[test]
    fn test_opposite_rotations_same_bounds() {
        assert_eq!(rotated_bounds(100, 80, 30.0), rotated_bounds(100, 80, -30.0));
    }

    #[test]
    fn test_arbitrary_angle_transparent_corners() {
        let img = PixelBuffer::filled(40, 40, [255, 255, 255, 255]).unwrap();
        let out = rotate(&img, 45.0).unwrap();

        assert!(out.width() > 40);
        assert_eq!(out.pixel(0, 0), Some(TRANSPARENT));
        let (cx, cy) = (out.width() / 2, out.height() / 2);
        assert_eq!(out.pixel(cx, cy), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = PixelBuffer::filled(1, 1, [128, 128, 128, 255]).unwrap();
        let out = rotate(&img, 45.0).unwrap();
        assert!(out.width() >= 1);
        assert!(out.height() >= 1);
    }

    #[test]
    fn test_bounds_never_zero() {
        for angle in [1.0, 15.0, 45.0, 89.0, 90.0, 135.0, 179.0, 180.0, 270.0, 359.0] {
            let (w, h) = rotated_bounds(10, 10, angle);
            assert!(w > 0, "Width should be > 0 for angle {}", angle);
            assert!(h > 0, "Height should be > 0 for angle {}", angle);
        }
    }
}
