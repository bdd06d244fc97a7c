//! Error type shared by every operation in the crate.

use thiserror::Error;

/// Errors that can occur while decoding, transforming or encoding an image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The byte signature does not belong to a supported format.
    #[error("Invalid or unsupported image format")]
    UnsupportedFormat,

    /// A requested width or height is not positive.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimension { width: u32, height: u32 },

    /// Watermark opacity outside 0..=100.
    #[error("Invalid opacity {0}: expected a value between 0 and 100")]
    InvalidOpacity(i32),

    /// A pixel buffer could not be allocated.
    #[error("Out of memory: could not allocate {bytes} bytes")]
    OutOfMemory { bytes: u64 },

    /// The resampling copy could not be performed.
    #[error("Resampling failed: {0}")]
    ResampleFailure(String),

    /// Pixel data length doesn't match the declared dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The codec recognized the format but could not decode the data.
    #[error("Corrupted or incomplete image data: {0}")]
    Decode(String),

    /// The codec failed to produce output bytes.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// I/O error while reading a source or writing a destination.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ImageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ImageError::InvalidDimension {
            width: 0,
            height: 10,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (10) must be non-zero"
        );

        let err = ImageError::InvalidOpacity(101);
        assert_eq!(
            err.to_string(),
            "Invalid opacity 101: expected a value between 0 and 100"
        );

        let err = ImageError::UnsupportedFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.png");
        let err: ImageError = io.into();
        assert!(matches!(err, ImageError::Io(_)));
    }
}
