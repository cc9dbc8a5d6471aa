//! Blob store implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{ErrorKind, Operator, services};

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Cache policy applied to every stored object (1 year).
const CACHE_CONTROL: &str = "max-age=31536000";

/// Key-addressed binary object store.
///
/// Wraps an OpenDAL [`Operator`] and maps stored keys onto the public URLs
/// that get persisted on records.
pub struct BlobStore {
    operator: Operator,
    config: StorageConfig,
}

impl BlobStore {
    /// Create a new blob store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::Memory => {
                let builder = services::Memory::default();

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Validate an upload against config constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if file size or MIME type is invalid.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }

        if !self.config.is_mime_type_allowed(content_type) {
            return Err(StorageError::invalid_mime_type(content_type));
        }

        Ok(())
    }

    /// Store an object under `key` and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.operator
            .write_with(key, bytes)
            .content_type(content_type)
            .cache_control(CACHE_CONTROL)
            .await
            .map_err(StorageError::from)?;

        Ok(self.url_for(key))
    }

    /// Delete an object. Deleting a non-existent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails for a reason other than the
    /// object being absent.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        match self.operator.delete(key).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    /// List all object keys under a prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if listing fails.
    pub async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let entries = self
            .operator
            .list_with(prefix)
            .recursive(true)
            .await
            .map_err(StorageError::from)?;

        Ok(entries
            .into_iter()
            .filter(|e| e.metadata().is_file())
            .map(|e| e.path().to_string())
            .collect())
    }

    /// Check if an object exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        self.operator.exists(key).await.unwrap_or(false)
    }

    /// Public URL for a stored key.
    #[must_use]
    pub fn url_for(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

/// Sanitize filename for storage key.
///
/// Removes or replaces characters that could cause issues in storage paths.
/// Only allows ASCII alphanumeric characters, dots, hyphens, and underscores.
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn memory_store() -> BlobStore {
        let config = StorageConfig::new(StorageProvider::memory(), "https://cdn.example.com");
        BlobStore::from_config(config).expect("memory store should build")
    }

    #[rstest]
    #[case("script.pdf", "script.pdf")]
    #[case("my file (1).png", "my_file__1_.png")]
    #[case("test@#$%.jpg", "test____.jpg")]
    #[case("日本語.pdf", "___.pdf")]
    fn test_sanitize_filename(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_filename(input), expected);
    }

    #[test]
    fn test_url_for_joins_cleanly() {
        let store = memory_store();
        assert_eq!(
            store.url_for("Scripts/images/1_a.png"),
            "https://cdn.example.com/Scripts/images/1_a.png"
        );
        assert_eq!(
            store.url_for("/Scripts/images/1_a.png"),
            "https://cdn.example.com/Scripts/images/1_a.png"
        );
    }

    #[test]
    fn test_validate_upload_size() {
        let config = StorageConfig::new(StorageProvider::memory(), "http://x").with_max_file_size(1024);
        let store = BlobStore::from_config(config).expect("should create store");

        assert!(store.validate_upload("application/pdf", 512).is_ok());

        let err = store.validate_upload("application/pdf", 2048).unwrap_err();
        assert!(matches!(err, StorageError::FileTooLarge { .. }));
    }

    #[test]
    fn test_validate_upload_mime_type() {
        let store = memory_store();

        assert!(store.validate_upload("application/pdf", 1024).is_ok());
        assert!(store.validate_upload("image/png", 1024).is_ok());

        let err = store
            .validate_upload("application/x-executable", 1024)
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidMimeType { .. }));
    }

    #[tokio::test]
    async fn test_put_returns_public_url() {
        let store = memory_store();
        let url = store
            .put("Scripts/images/1_a.png", Bytes::from_static(b"png"), "image/png")
            .await
            .expect("put should succeed");

        assert_eq!(url, "https://cdn.example.com/Scripts/images/1_a.png");
        assert!(store.exists("Scripts/images/1_a.png").await);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = memory_store();
        store
            .put("Gallery/1_a.png", Bytes::from_static(b"x"), "image/png")
            .await
            .expect("put should succeed");

        store.delete("Gallery/1_a.png").await.expect("first delete");
        assert!(!store.exists("Gallery/1_a.png").await);

        // Second delete of the same key is a no-op
        store.delete("Gallery/1_a.png").await.expect("second delete");
        // And so is deleting a key that never existed
        store.delete("Gallery/never.png").await.expect("missing key");
    }

    #[tokio::test]
    async fn test_list_by_prefix() {
        let store = memory_store();
        for key in [
            "MainpageVideo/1_a.mp4",
            "MainpageVideo/2_b.mp4",
            "Gallery/1_c.png",
        ] {
            store
                .put(key, Bytes::from_static(b"x"), "video/mp4")
                .await
                .expect("put should succeed");
        }

        let mut keys = store.list("MainpageVideo/").await.expect("list");
        keys.sort();
        assert_eq!(keys, vec!["MainpageVideo/1_a.mp4", "MainpageVideo/2_b.mp4"]);

        assert!(store.list("Nothing/").await.expect("empty list").is_empty());
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        // Sanitized filenames only contain safe characters
        proptest! {
            #[test]
            fn prop_sanitized_filename_safe_chars(filename in ".*") {
                let sanitized = sanitize_filename(&filename);

                for c in sanitized.chars() {
                    let is_safe = c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_';
                    prop_assert!(is_safe, "Unexpected character in sanitized filename: {}", c);
                }
            }
        }

        // Sanitizing never changes the length, so extensions survive
        proptest! {
            #[test]
            fn prop_sanitize_preserves_length(filename in "[a-zA-Z0-9 @#()]{0,64}") {
                prop_assert_eq!(sanitize_filename(&filename).len(), filename.len());
            }
        }
    }
}
