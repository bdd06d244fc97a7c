//! Serializable descriptions of transform pipelines.
//!
//! Hosts that keep image recipes in configuration files deserialize these
//! types and hand them to [`ImageHandle::apply`](crate::ImageHandle::apply).
//! Omitted fields take the defaults below.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::geometry::DEFAULT_ROTATION;

/// How [`ImageHandle::resize`](crate::ImageHandle::resize) treats the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Downscale to fit inside the box, keeping the aspect ratio.
    #[default]
    Fit,
    /// Center-crop to the box's aspect ratio, then scale to exactly the box.
    Crop,
}

/// Watermark placement and strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkOptions {
    /// Opacity in percent (0 to 100). Ignored for PNG watermarks.
    pub opacity: i32,
    /// Left offset in pixels.
    pub x: i32,
    /// Top offset in pixels.
    pub y: i32,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        Self {
            opacity: 35,
            x: 5,
            y: 5,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// JPEG quality (0 to 100). Accepted and ignored for GIF and PNG.
    pub quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self { quality: 100 }
    }
}

fn default_rotation() -> f64 {
    DEFAULT_ROTATION
}

/// One step of a transform pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation {
    Resize {
        width: u32,
        height: u32,
        #[serde(default)]
        mode: ResizeMode,
    },
    Rotate {
        #[serde(default = "default_rotation")]
        degrees: f64,
    },
    /// Overlay the image stored at `path`.
    Watermark {
        path: PathBuf,
        #[serde(default)]
        options: WatermarkOptions,
    },
}
