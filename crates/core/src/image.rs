//! Validation of uploaded gallery images.
//!
//! The declared content type (if any) must be one of the accepted image
//! types and must agree with the format sniffed from the file's magic bytes.

use image::ImageFormat;

use crate::error::CoreError;

/// Default per-file upload limit (10 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Image formats accepted for program galleries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl ImageKind {
    /// Parse a MIME type. Returns `None` for anything not accepted.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::Webp),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    fn from_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::WebP => Some(Self::Webp),
            ImageFormat::Gif => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    /// File extension used when naming stored objects.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Gif => "gif",
        }
    }
}

/// Validate one uploaded image and return its detected kind.
///
/// A missing or `application/octet-stream` content type defers entirely to
/// the sniffed format.
pub fn validate_image(
    content_type: Option<&str>,
    bytes: &[u8],
    max_bytes: usize,
) -> Result<ImageKind, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::Validation("Image file is empty".into()));
    }
    if bytes.len() > max_bytes {
        return Err(CoreError::Validation(format!(
            "Image is {} bytes, exceeding the {max_bytes} byte limit",
            bytes.len()
        )));
    }

    let detected = image::guess_format(bytes)
        .ok()
        .and_then(ImageKind::from_format)
        .ok_or_else(|| {
            CoreError::Validation("Unsupported image format. Accepted: jpeg, png, webp, gif".into())
        })?;

    match content_type {
        None | Some("application/octet-stream") => Ok(detected),
        Some(declared) => match ImageKind::from_mime(declared) {
            Some(kind) if kind == detected => Ok(detected),
            Some(_) => Err(CoreError::Validation(format!(
                "Declared content type '{declared}' does not match file contents ({})",
                detected.mime()
            ))),
            None => Err(CoreError::Validation(format!(
                "Unsupported content type '{declared}'. Accepted: image/jpeg, image/png, image/webp, image/gif"
            ))),
        },
    }
}
