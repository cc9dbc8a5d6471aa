//! Main-page video routes.
//!
//! The video has no database row: the blob store is the source of truth
//! under the `MainpageVideo/` prefix, holding at most one live object.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::{info, warn};

use atelier_core::attachment::AttachmentManager;
use atelier_shared::AppError;

use crate::AppState;
use crate::error::{ApiResult, not_found, validation};
use crate::forms::FormData;

const NAMESPACE: &str = "MainpageVideo";
const PREFIX: &str = "MainpageVideo/";

/// Creates the main-page video routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(upload_video).delete(delete_video))
        .route("/latest", get(latest_video))
}

/// POST `/api/video`: replace the main-page video.
///
/// Multipart file `video`. The new object is uploaded first; every other
/// object under the prefix is then deleted, so a failed upload leaves the
/// current video live.
async fn upload_video(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;
    let file = form.file("video").ok_or_else(|| validation("video is required"))?;

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    let fresh = media.attach("videos", file).await?;

    let keys = state
        .storage
        .list(PREFIX)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;
    for key in keys.into_iter().filter(|key| *key != fresh.key) {
        if let Err(e) = state.storage.delete(&key).await {
            warn!(%key, error = %e, "failed to delete superseded video");
        }
    }

    info!(key = %fresh.key, "main-page video replaced");
    Ok(Json(json!({
        "message": "Video uploaded successfully",
        "url": fresh.url,
    })))
}

/// GET `/api/video/latest`: URL of the newest stored video.
async fn latest_video(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let keys = state
        .storage
        .list(PREFIX)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    // Object names start with an upload-millis stem, so the lexicographic
    // maximum of the final path segment is the newest upload.
    let latest = keys
        .into_iter()
        .max_by(|a, b| basename(a).cmp(basename(b)))
        .ok_or_else(|| not_found("video"))?;

    Ok(Json(json!({ "url": state.storage.url_for(&latest) })))
}

/// DELETE `/api/video`: remove every stored video.
async fn delete_video(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let keys = state
        .storage
        .list(PREFIX)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;
    if keys.is_empty() {
        return Err(not_found("video"));
    }

    for key in &keys {
        if let Err(e) = state.storage.delete(key).await {
            warn!(%key, error = %e, "failed to delete video");
        }
    }

    info!(count = keys.len(), "main-page videos deleted");
    Ok(Json(json!({ "message": "Video deleted successfully" })))
}

fn basename(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use sea_orm::DatabaseConnection;
    use tower::ServiceExt;

    use atelier_core::storage::{BlobStore, StorageConfig, StorageProvider};

    use super::*;

    fn test_state() -> AppState {
        let config = StorageConfig::new(StorageProvider::memory(), "https://cdn.example.com");
        AppState {
            db: Arc::new(DatabaseConnection::Disconnected),
            storage: Arc::new(BlobStore::from_config(config).expect("memory store")),
        }
    }

    fn app(state: &AppState) -> Router {
        Router::new()
            .nest("/api/video", routes())
            .with_state(state.clone())
    }

    fn video_upload_request(filename: &str) -> Request<Body> {
        let boundary = "test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"video\"; filename=\"{filename}\"\r\n\
             Content-Type: video/mp4\r\n\r\n\
             fake-mp4-bytes\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/video")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_latest_is_404_when_no_video_stored() {
        let state = test_state();
        let response = app(&state)
            .oneshot(
                Request::builder()
                    .uri("/api/video/latest")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upload_then_latest_returns_url() {
        let state = test_state();

        let response = app(&state).oneshot(video_upload_request("intro.mp4")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let uploaded = json_body(response).await;
        let url = uploaded["url"].as_str().expect("url in response");
        assert!(url.starts_with("https://cdn.example.com/MainpageVideo/videos/"));

        let response = app(&state)
            .oneshot(
                Request::builder()
                    .uri("/api/video/latest")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["url"], url);
    }

    #[tokio::test]
    async fn test_second_upload_supersedes_first() {
        let state = test_state();

        app(&state).oneshot(video_upload_request("first.mp4")).await.unwrap();
        app(&state).oneshot(video_upload_request("second.mp4")).await.unwrap();

        let keys = state.storage.list(PREFIX).await.expect("list");
        assert_eq!(keys.len(), 1);
        assert!(keys[0].ends_with("_second.mp4"));
    }

    #[tokio::test]
    async fn test_upload_without_file_is_400() {
        let state = test_state();
        let boundary = "test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"other\"\r\n\r\n\
             value\r\n\
             --{boundary}--\r\n"
        );
        let response = app(&state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/video")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_delete_removes_everything() {
        let state = test_state();
        app(&state).oneshot(video_upload_request("a.mp4")).await.unwrap();

        let response = app(&state)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/video")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.storage.list(PREFIX).await.expect("list").is_empty());

        // Nothing left to delete
        let response = app(&state)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/video")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
