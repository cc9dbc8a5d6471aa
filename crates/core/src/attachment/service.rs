//! Attachment manager implementation.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::error::AttachmentError;
use super::types::{MediaRef, UploadedFile};
use crate::storage::{BlobStore, sanitize_filename};

/// Manages the media lifecycle for one content-type namespace.
///
/// Keys are laid out as `{namespace}/{folder}/{millis}_{filename}`, e.g.
/// `Scripts/images/1700000000000_poster.png`. The millisecond prefix avoids
/// collisions between uploads of identically named files.
pub struct AttachmentManager {
    store: Arc<BlobStore>,
    namespace: String,
}

impl AttachmentManager {
    /// Create a manager scoped to a content-type namespace.
    #[must_use]
    pub fn new(store: Arc<BlobStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    /// The underlying blob store.
    #[must_use]
    pub fn store(&self) -> &Arc<BlobStore> {
        &self.store
    }

    /// Storage key for a fresh upload.
    fn object_key(&self, folder: &str, filename: &str) -> String {
        format!(
            "{}/{}/{}_{}",
            self.namespace,
            folder,
            Utc::now().timestamp_millis(),
            sanitize_filename(filename)
        )
    }

    /// Upload a file and return its reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is empty, fails validation, or the
    /// storage write fails. Nothing is written on a validation failure.
    pub async fn attach(
        &self,
        folder: &str,
        file: &UploadedFile,
    ) -> Result<MediaRef, AttachmentError> {
        if file.bytes.is_empty() {
            return Err(AttachmentError::EmptyFile(folder.to_string()));
        }
        self.store.validate_upload(&file.content_type, file.size())?;

        let key = self.object_key(folder, &file.filename);
        let url = self
            .store
            .put(&key, file.bytes.clone(), &file.content_type)
            .await?;

        Ok(MediaRef::new(url, key))
    }

    /// Replace a single-valued attachment.
    ///
    /// With no new file this is a no-op and the existing attachment is
    /// preserved (`Ok(None)` means "keep what you have"). Otherwise the new
    /// file is uploaded first, then the old object is deleted; a failed
    /// upload aborts before any delete touches the live attachment.
    ///
    /// # Errors
    ///
    /// Returns an error only if the upload fails.
    pub async fn replace(
        &self,
        folder: &str,
        new_file: Option<&UploadedFile>,
        old: Option<&MediaRef>,
    ) -> Result<Option<MediaRef>, AttachmentError> {
        let Some(file) = new_file else {
            return Ok(None);
        };

        let fresh = self.attach(folder, file).await?;
        if let Some(old) = old {
            self.discard(old).await;
        }

        Ok(Some(fresh))
    }

    /// Replace a multi-valued attachment field.
    ///
    /// An empty `new_files` slice preserves the existing array. A non-empty
    /// one fully replaces it: every new member is uploaded, then every old
    /// member is deleted. If any upload fails, members uploaded so far are
    /// removed again so the failed batch leaves no orphans, and the old
    /// array stays live.
    ///
    /// # Errors
    ///
    /// Returns an error only if an upload fails.
    pub async fn replace_all(
        &self,
        folder: &str,
        new_files: &[UploadedFile],
        old: &[MediaRef],
    ) -> Result<Option<Vec<MediaRef>>, AttachmentError> {
        if new_files.is_empty() {
            return Ok(None);
        }

        let mut fresh = Vec::with_capacity(new_files.len());
        for file in new_files {
            match self.attach(folder, file).await {
                Ok(media) => fresh.push(media),
                Err(e) => {
                    for media in &fresh {
                        self.discard(media).await;
                    }
                    return Err(e);
                }
            }
        }

        self.discard_all(old).await;
        Ok(Some(fresh))
    }

    /// Delete a referenced object, at most once.
    ///
    /// Failures are logged and swallowed: a stale orphan is preferred over
    /// failing the surrounding record mutation.
    pub async fn discard(&self, media: &MediaRef) {
        if let Err(e) = self.store.delete(&media.key).await {
            warn!(key = %media.key, error = %e, "failed to delete blob, leaving orphan");
        }
    }

    /// Delete every referenced object in a collection.
    pub async fn discard_all(&self, refs: &[MediaRef]) {
        for media in refs {
            self.discard(media).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StorageConfig, StorageProvider};
    use bytes::Bytes;

    fn manager(namespace: &str) -> AttachmentManager {
        let config = StorageConfig::new(StorageProvider::memory(), "https://cdn.example.com");
        let store = Arc::new(BlobStore::from_config(config).expect("memory store"));
        AttachmentManager::new(store, namespace)
    }

    fn png(name: &str) -> UploadedFile {
        UploadedFile::new(name, "image/png", Bytes::from_static(b"png-bytes"))
    }

    #[tokio::test]
    async fn test_attach_stores_under_namespace() {
        let manager = manager("Scripts");
        let media = manager.attach("images", &png("poster.png")).await.expect("attach");

        assert!(media.key.starts_with("Scripts/images/"));
        assert!(media.key.ends_with("_poster.png"));
        assert_eq!(media.url, format!("https://cdn.example.com/{}", media.key));
        assert!(manager.store().exists(&media.key).await);
    }

    #[tokio::test]
    async fn test_attach_rejects_empty_file() {
        let manager = manager("Scripts");
        let empty = UploadedFile::new("a.png", "image/png", Bytes::new());

        let err = manager.attach("images", &empty).await.unwrap_err();
        assert!(matches!(err, AttachmentError::EmptyFile(_)));
        assert!(err.is_rejected_input());
    }

    #[tokio::test]
    async fn test_attach_rejects_disallowed_mime_and_writes_nothing() {
        let manager = manager("Scripts");
        let bad = UploadedFile::new("x.exe", "application/x-executable", Bytes::from_static(b"x"));

        let err = manager.attach("images", &bad).await.unwrap_err();
        assert!(err.is_rejected_input());
        assert!(manager.store().list("Scripts/").await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_replace_without_new_file_keeps_existing() {
        let manager = manager("Aboutpage");
        let old = manager.attach("image", &png("old.png")).await.expect("attach");

        let result = manager.replace("image", None, Some(&old)).await.expect("replace");
        assert!(result.is_none());
        assert!(manager.store().exists(&old.key).await);
    }

    #[tokio::test]
    async fn test_replace_uploads_new_then_deletes_old() {
        let manager = manager("Aboutpage");
        let old = manager.attach("image", &png("old.png")).await.expect("attach");

        let fresh = manager
            .replace("image", Some(&png("new.png")), Some(&old))
            .await
            .expect("replace")
            .expect("new ref returned");

        assert!(manager.store().exists(&fresh.key).await);
        assert!(!manager.store().exists(&old.key).await);
        assert_ne!(fresh.key, old.key);
    }

    #[tokio::test]
    async fn test_failed_replace_leaves_old_attachment_live() {
        let manager = manager("Aboutpage");
        let old = manager.attach("image", &png("old.png")).await.expect("attach");

        let bad = UploadedFile::new("x.bin", "application/octet-stream", Bytes::from_static(b"x"));
        let err = manager.replace("image", Some(&bad), Some(&old)).await.unwrap_err();

        assert!(err.is_rejected_input());
        assert!(manager.store().exists(&old.key).await);
    }

    #[tokio::test]
    async fn test_replace_all_fully_replaces_array() {
        let manager = manager("Environment");
        let old_a = manager.attach("images", &png("a.png")).await.expect("attach");
        let old_b = manager.attach("images", &png("b.png")).await.expect("attach");

        let fresh = manager
            .replace_all("images", &[png("c.png"), png("d.png")], &[old_a.clone(), old_b.clone()])
            .await
            .expect("replace_all")
            .expect("new array returned");

        assert_eq!(fresh.len(), 2);
        for media in &fresh {
            assert!(manager.store().exists(&media.key).await);
        }
        assert!(!manager.store().exists(&old_a.key).await);
        assert!(!manager.store().exists(&old_b.key).await);
    }

    #[tokio::test]
    async fn test_replace_all_empty_input_keeps_old_array() {
        let manager = manager("Environment");
        let old = manager.attach("images", &png("a.png")).await.expect("attach");

        let result = manager
            .replace_all("images", &[], std::slice::from_ref(&old))
            .await
            .expect("replace_all");

        assert!(result.is_none());
        assert!(manager.store().exists(&old.key).await);
    }

    #[tokio::test]
    async fn test_replace_all_rolls_back_partial_batch() {
        let manager = manager("Environment");
        let old = manager.attach("images", &png("a.png")).await.expect("attach");

        let bad = UploadedFile::new("x.bin", "application/octet-stream", Bytes::from_static(b"x"));
        let err = manager
            .replace_all("images", &[png("ok.png"), bad], std::slice::from_ref(&old))
            .await
            .unwrap_err();
        assert!(err.is_rejected_input());

        // Old array untouched, no half-uploaded members left behind
        let keys = manager.store().list("Environment/").await.expect("list");
        assert_eq!(keys, vec![old.key.clone()]);
    }

    #[tokio::test]
    async fn test_discard_all_cascades() {
        let manager = manager("Content");
        let a = manager.attach("images", &png("a.png")).await.expect("attach");
        let b = manager.attach("videos", &UploadedFile::new("v.mp4", "video/mp4", Bytes::from_static(b"v")))
            .await
            .expect("attach");

        manager.discard_all(&[a, b]).await;
        assert!(manager.store().list("Content/").await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_discard_missing_object_is_silent() {
        let manager = manager("Content");
        // Never uploaded; discard must not panic or error
        manager
            .discard(&MediaRef::new("https://cdn.example.com/Content/x", "Content/x"))
            .await;
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::storage::{StorageConfig, StorageProvider};
    use proptest::prelude::*;

    // Object keys always carry the namespace/folder prefix and the
    // sanitized filename suffix.
    proptest! {
        #[test]
        fn prop_object_key_format(
            filename in "[a-zA-Z0-9 _-]{1,40}\\.[a-z]{2,4}",
        ) {
            let config = StorageConfig::new(StorageProvider::memory(), "http://x");
            let store = Arc::new(BlobStore::from_config(config).expect("store"));
            let manager = AttachmentManager::new(store, "Scripts");

            let key = manager.object_key("images", &filename);

            prop_assert!(key.starts_with("Scripts/images/"));
            prop_assert!(key.ends_with(&crate::storage::sanitize_filename(&filename)));

            let parts: Vec<&str> = key.split('/').collect();
            prop_assert_eq!(parts.len(), 3);
            // timestamp prefix before the first underscore is numeric
            let stem = parts[2];
            let (millis, _) = stem.split_once('_').expect("millis prefix");
            prop_assert!(millis.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
