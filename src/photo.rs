//! User photo ingestion
//!
//! Reads a photo from disk, validates it, and encodes it as a data URI the
//! generation API accepts alongside remote URLs.

use crate::models::UserPhoto;
use crate::{Error, Result};
use base64::Engine as _;
use std::path::Path;

/// Photos above this size are rejected before encoding.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

pub fn detect_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        _ => None,
    }
}

impl UserPhoto {
    /// Load a photo from disk and encode it as a base64 data URI.
    ///
    /// Rejects files that are not a recognized image format (sniffed from
    /// content, not the extension) and files larger than [`MAX_PHOTO_BYTES`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;

        if bytes.len() > MAX_PHOTO_BYTES {
            return Err(Error::Photo(format!(
                "Image size should be less than 5MB (got {} bytes)",
                bytes.len()
            )));
        }

        let mime = detect_image_mime(&bytes)
            .ok_or_else(|| Error::Photo("Please select an image file".to_string()))?;

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("photo")
            .to_string();

        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);

        Ok(Self {
            data: format!("data:{};base64,{}", mime, encoded),
            name,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
