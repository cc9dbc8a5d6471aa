//! Attachment types and data structures.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Reference from a record field to a blob-store object.
///
/// Both the public URL (what clients render) and the storage key (what
/// deletion needs) are persisted, so no key ever has to be re-derived by
/// splitting a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Public URL of the object.
    pub url: String,
    /// Storage key of the object.
    pub key: String,
}

impl MediaRef {
    /// Create a new media reference.
    #[must_use]
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
        }
    }
}

/// An uploaded file buffered in memory, as parsed from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename as sent by the client.
    pub filename: String,
    /// MIME type of the file.
    pub content_type: String,
    /// File contents.
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Create a new uploaded file.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// File size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_ref_serde_roundtrip() {
        let media = MediaRef::new(
            "https://cdn.example.com/Scripts/images/1_a.png",
            "Scripts/images/1_a.png",
        );
        let json = serde_json::to_string(&media).expect("serialize");
        let back: MediaRef = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, media);
    }

    #[test]
    fn test_uploaded_file_size() {
        let file = UploadedFile::new("a.png", "image/png", &b"12345"[..]);
        assert_eq!(file.size(), 5);
    }
}
