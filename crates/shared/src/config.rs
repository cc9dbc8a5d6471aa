//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Blob storage configuration.
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origin for the admin frontend.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
    /// Maximum multipart body size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origin() -> String {
    "http://localhost:3001".to_string()
}

fn default_max_upload_bytes() -> usize {
    // Main-page video uploads are the largest payload
    200 * 1024 * 1024
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Blob storage configuration as read from the environment.
///
/// Maps onto `atelier_core::storage::StorageProvider` in the server binary.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Storage backend: `s3` or `local`.
    #[serde(default = "default_storage_kind")]
    pub kind: String,
    /// S3 endpoint URL.
    #[serde(default)]
    pub endpoint: String,
    /// Bucket name (S3 only).
    #[serde(default)]
    pub bucket: String,
    /// Access key ID (S3 only).
    #[serde(default)]
    pub access_key_id: String,
    /// Secret access key (S3 only).
    #[serde(default)]
    pub secret_access_key: String,
    /// Bucket region (S3 only).
    #[serde(default = "default_region")]
    pub region: String,
    /// Public base URL that stored object keys are appended to.
    ///
    /// For S3 this is the bucket's public endpoint; for local storage it is
    /// the path under which the upload directory is served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Root directory for local storage.
    #[serde(default = "default_local_root")]
    pub local_root: String,
}

fn default_storage_kind() -> String {
    "local".to_string()
}

fn default_region() -> String {
    "eu-north-1".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:5000/uploads".to_string()
}

fn default_local_root() -> String {
    "./uploads".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("ATELIER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(default_port(), 5000);
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_cors_origin(), "http://localhost:3001");
        assert_eq!(default_storage_kind(), "local");
    }

    #[test]
    fn test_load_from_env() {
        temp_env::with_vars(
            [
                (
                    "ATELIER__DATABASE__URL",
                    Some("postgres://localhost/atelier"),
                ),
                ("ATELIER__SERVER__PORT", Some("8081")),
                ("ATELIER__STORAGE__KIND", Some("s3")),
                ("ATELIER__STORAGE__BUCKET", Some("portfolio-media")),
            ],
            || {
                let config = AppConfig::load().expect("config should load from env");
                assert_eq!(config.database.url, "postgres://localhost/atelier");
                assert_eq!(config.server.port, 8081);
                assert_eq!(config.storage.kind, "s3");
                assert_eq!(config.storage.bucket, "portfolio-media");
                // Defaults fill the rest
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.storage.region, "eu-north-1");
            },
        );
    }
}
