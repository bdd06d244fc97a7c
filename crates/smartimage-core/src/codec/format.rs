//! Format tags, signature sniffing and the encode-time extension table.

use std::fmt::{Display, Formatter};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Supported container formats.
///
/// `Unknown` only appears on buffers that were wrapped directly rather than
/// decoded; it encodes as JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossy, no alpha.
    Jpeg,
    /// Palette based.
    Gif,
    /// Lossless with alpha.
    Png,
    #[default]
    Unknown,
}

impl ImageFormat {
    /// Identify the format from the leading bytes of an encoded image.
    ///
    /// Anything other than JPEG, GIF or PNG is reported as `Unknown`.
    pub fn sniff(bytes: &[u8]) -> Self {
        match image::guess_format(bytes) {
            Ok(image::ImageFormat::Jpeg) => ImageFormat::Jpeg,
            Ok(image::ImageFormat::Gif) => ImageFormat::Gif,
            Ok(image::ImageFormat::Png) => ImageFormat::Png,
            Ok(other) => {
                log::trace!("signature recognized as unsupported format {other:?}");
                ImageFormat::Unknown
            }
            Err(_) => ImageFormat::Unknown,
        }
    }

    /// Map a file extension to an output format.
    ///
    /// The match is case-sensitive: `"PNG"` is not `"png"` and falls back to
    /// JPEG like any other unrecognized extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "gif" => ImageFormat::Gif,
            "png" => ImageFormat::Png,
            _ => ImageFormat::Jpeg,
        }
    }

    /// Output format for a destination path, JPEG when there is no extension.
    ///
    /// The extension is whatever follows the last `.` of the file name, so a
    /// dot-file such as `.png` counts as PNG.
    pub fn from_path(path: &Path) -> Self {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.rsplit_once('.'))
            .map_or(ImageFormat::Jpeg, |(_, ext)| Self::from_extension(ext))
    }

    /// The format actually written when this tag is asked to encode.
    pub fn output_format(self) -> Self {
        match self {
            ImageFormat::Unknown => ImageFormat::Jpeg,
            other => other,
        }
    }

    /// Content type to attach to an in-memory encode.
    pub fn mime_type(self) -> &'static str {
        match self.output_format() {
            ImageFormat::Gif => "image/gif",
            ImageFormat::Png => "image/png",
            _ => "image/jpeg",
        }
    }

    /// Whether images of this format carry their own alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, ImageFormat::Png)
    }

    /// `(bits per channel, channels)` of the decoded raster, used for
    /// memory estimates.
    pub fn pixel_depth(self) -> (u32, u32) {
        match self {
            ImageFormat::Png => (8, 4),
            _ => (8, 3),
        }
    }

    pub(crate) fn to_image_format(self) -> Option<image::ImageFormat> {
        match self {
            ImageFormat::Jpeg => Some(image::ImageFormat::Jpeg),
            ImageFormat::Gif => Some(image::ImageFormat::Gif),
            ImageFormat::Png => Some(image::ImageFormat::Png),
            ImageFormat::Unknown => None,
        }
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::Png => "png",
            ImageFormat::Unknown => "unknown",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_table() {
        assert_eq!(ImageFormat::from_extension("jpg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("jpeg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("gif"), ImageFormat::Gif);
        assert_eq!(ImageFormat::from_extension("png"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_extension("webp"), ImageFormat::Jpeg);
    }

    #[test]
    fn test_extension_is_case_sensitive() {
        assert_eq!(ImageFormat::from_extension("PNG"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("Gif"), ImageFormat::Jpeg);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(ImageFormat::from_path(Path::new("out/a.png")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("a.b.gif")), ImageFormat::Gif);
        assert_eq!(ImageFormat::from_path(Path::new("noext")), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path(Path::new("dir.png/file")), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path(Path::new("out/.png")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("out/trailing.")), ImageFormat::Jpeg);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(ImageFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(ImageFormat::Gif.mime_type(), "image/gif");
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
        assert_eq!(ImageFormat::Unknown.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_sniff_signatures() {
        assert_eq!(ImageFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::sniff(b"GIF89a\x01\x00"), ImageFormat::Gif);
        assert_eq!(
            ImageFormat::sniff(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
            ImageFormat::Png
        );
        assert_eq!(ImageFormat::sniff(b"hello world"), ImageFormat::Unknown);
        assert_eq!(ImageFormat::sniff(&[]), ImageFormat::Unknown);
    }

    #[test]
    fn test_only_png_has_alpha() {
        assert!(ImageFormat::Png.has_alpha());
        assert!(!ImageFormat::Jpeg.has_alpha());
        assert!(!ImageFormat::Gif.has_alpha());
        assert!(!ImageFormat::Unknown.has_alpha());
    }
}
