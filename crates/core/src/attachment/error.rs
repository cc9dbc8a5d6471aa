//! Attachment error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Attachment operation errors.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// Uploaded file has no content.
    #[error("empty upload for field '{0}'")]
    EmptyFile(String),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AttachmentError {
    /// Whether this error should surface as a 400 rather than a 500.
    #[must_use]
    pub const fn is_rejected_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyFile(_)
                | Self::Storage(
                    StorageError::FileTooLarge { .. } | StorageError::InvalidMimeType { .. }
                )
        )
    }
}
