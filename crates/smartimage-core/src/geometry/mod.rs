//! Geometry engine: target sizes, source windows and the pixel copies that
//! realise them.
//!
//! All functions read a borrowed [`PixelBuffer`](crate::PixelBuffer) and
//! return a new one, so a caller swaps buffers in a single assignment and
//! never observes a half-transformed image.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, x grows right, y grows down
//! - Rotation angles are in degrees, positive = counter-clockwise

mod crop;
mod fit;
mod rect;
mod resample;
mod rotation;

pub use crop::{crop_resize, crop_window};
pub use fit::{fit_dimensions, fit_resize};
pub use rect::Rect;
pub use resample::resample;
pub use rotation::{rotate, rotated_bounds, DEFAULT_ROTATION};
