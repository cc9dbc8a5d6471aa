//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes, one module per content type
//! - Multipart form parsing for media uploads
//! - Error-to-JSON response mapping

pub mod error;
pub mod forms;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use atelier_core::storage::BlobStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Blob store for media attachments.
    pub storage: Arc<BlobStore>,
}

/// Creates the main application router.
///
/// `cors_origin` is the single allowed browser origin (`*` for any);
/// `max_upload_bytes` bounds multipart bodies, sized for video uploads.
/// With local-filesystem storage, `local_media_root` mounts the upload
/// directory under `/uploads` so persisted media URLs resolve; S3-backed
/// deployments pass `None` and serve media from the bucket endpoint.
pub fn create_router(
    state: AppState,
    cors_origin: &str,
    max_upload_bytes: usize,
    local_media_root: Option<&str>,
) -> Router {
    let mut router = Router::new()
        .merge(routes::health::routes())
        .nest("/api", routes::api_routes());

    if let Some(root) = local_media_root {
        router = router.nest_service("/uploads", ServeDir::new(root));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

fn cors_layer(cors_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if cors_origin == "*" {
        return layer.allow_origin(Any);
    }
    match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            warn!(origin = %cors_origin, "invalid CORS origin, allowing any");
            layer.allow_origin(Any)
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sea_orm::DatabaseConnection;
    use tower::ServiceExt;

    use atelier_core::storage::{StorageConfig, StorageProvider};

    use super::*;

    fn test_state() -> AppState {
        let config = StorageConfig::new(StorageProvider::memory(), "https://cdn.example.com");
        AppState {
            db: Arc::new(DatabaseConnection::Disconnected),
            storage: Arc::new(BlobStore::from_config(config).expect("memory store")),
        }
    }

    #[tokio::test]
    async fn test_local_media_root_served_under_uploads() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("Gallery/images")).expect("mkdir");
        std::fs::write(dir.path().join("Gallery/images/1_a.png"), b"png-bytes").expect("write");

        let root = dir.path().to_str().expect("utf-8 path").to_string();
        let app = create_router(test_state(), "*", 1024, Some(&root));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/uploads/Gallery/images/1_a.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_uploads_absent_without_local_root() {
        let app = create_router(test_state(), "*", 1024, None);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/uploads/x.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
