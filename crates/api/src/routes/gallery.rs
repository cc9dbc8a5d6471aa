//! Image gallery routes.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use atelier_core::attachment::{AttachmentManager, MediaRef};
use atelier_db::repositories::GalleryRepository;

use crate::AppState;
use crate::error::{ApiResult, not_found, validation};
use crate::forms::FormData;

const NAMESPACE: &str = "Gallery";

/// Hard cap on stored gallery images.
const MAX_IMAGES: u64 = 40;

/// Creates the gallery routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_images))
        .route("/upload", post(upload_images))
        .route("/{id}", delete(delete_image))
}

/// GET `/api/images`: list all gallery images, newest first.
async fn list_images(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = GalleryRepository::new((*state.db).clone());
    Ok(Json(repo.list().await?))
}

/// POST `/api/images/upload`: add images to the gallery.
///
/// Multipart file array `images`. The 40-image cap is checked against the
/// incoming batch before any blob is written; an over-cap request writes
/// nothing.
async fn upload_images(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;
    let files = form.files("images");
    if files.is_empty() {
        return Err(validation("images are required"));
    }

    let repo = GalleryRepository::new((*state.db).clone());
    let count = repo.count().await?;
    if count + files.len() as u64 > MAX_IMAGES {
        return Err(validation(format!(
            "gallery is limited to {MAX_IMAGES} images ({count} stored, {} uploaded)",
            files.len()
        )));
    }

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    let Some(refs) = media.replace_all("images", files, &[]).await? else {
        return Err(validation("images are required"));
    };

    let mut models = Vec::with_capacity(refs.len());
    for (file, media_ref) in files.iter().zip(refs) {
        models.push(repo.insert(file.filename.clone(), media_ref).await?);
    }

    info!(count = models.len(), "gallery images uploaded");
    Ok((StatusCode::CREATED, Json(models)))
}

/// DELETE `/api/images/{id}`: remove a gallery image and its blob.
async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = GalleryRepository::new((*state.db).clone());
    let Some(model) = repo.find_by_id(id).await? else {
        return Err(not_found("gallery image"));
    };

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    media
        .discard(&MediaRef::new(model.image_url, model.image_key))
        .await;
    repo.delete(id).await?;

    info!(%id, "gallery image deleted");
    Ok(Json(json!({ "message": "Image deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbBackend, Schema};
    use tower::ServiceExt;

    use atelier_core::storage::{BlobStore, StorageConfig, StorageProvider};
    use atelier_db::entities::gallery_images;

    use super::*;

    async fn test_state() -> AppState {
        // One connection only; an in-memory database dies with its connection
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1);
        let db = Database::connect(options).await.expect("connect");
        let schema = Schema::new(DbBackend::Sqlite);
        let stmt = schema.create_table_from_entity(gallery_images::Entity);
        db.execute(db.get_database_backend().build(&stmt))
            .await
            .expect("create table");

        let config = StorageConfig::new(StorageProvider::memory(), "https://cdn.example.com");
        AppState {
            db: Arc::new(db),
            storage: Arc::new(BlobStore::from_config(config).expect("memory store")),
        }
    }

    fn app(state: &AppState) -> Router {
        Router::new()
            .nest("/api/images", routes())
            .with_state(state.clone())
    }

    fn upload_request(filenames: &[&str]) -> Request<Body> {
        let boundary = "test-boundary";
        let mut body = String::new();
        for filename in filenames {
            body.push_str(&format!(
                "--{boundary}\r\n\
                 Content-Disposition: form-data; name=\"images\"; filename=\"{filename}\"\r\n\
                 Content-Type: image/png\r\n\r\n\
                 fake-png-bytes\r\n"
            ));
        }
        body.push_str(&format!("--{boundary}--\r\n"));
        Request::builder()
            .method("POST")
            .uri("/api/images/upload")
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

    async fn fill_to_cap(state: &AppState) {
        let repo = GalleryRepository::new((*state.db).clone());
        for n in 0..MAX_IMAGES {
            let key = format!("Gallery/images/{n}_seed.png");
            let media = MediaRef::new(format!("https://cdn.example.com/{key}"), key);
            repo.insert(format!("{n}_seed.png"), media)
                .await
                .expect("seed insert");
        }
    }

    #[tokio::test]
    async fn test_upload_stores_images() {
        let state = test_state().await;

        let response = app(&state)
            .oneshot(upload_request(&["a.png", "b.png"]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let models = json_body(response).await;
        assert_eq!(models.as_array().map(Vec::len), Some(2));

        let repo = GalleryRepository::new((*state.db).clone());
        assert_eq!(repo.count().await.expect("count"), 2);
        assert_eq!(
            state.storage.list("Gallery/").await.expect("list").len(),
            2
        );
    }

    #[tokio::test]
    async fn test_upload_over_cap_is_rejected_before_any_write() {
        let state = test_state().await;
        fill_to_cap(&state).await;

        let response = app(&state)
            .oneshot(upload_request(&["one-too-many.png"]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "VALIDATION_ERROR");

        // The cap check runs before uploads, so the blob store stays empty
        assert!(state.storage.list("Gallery/").await.expect("list").is_empty());
        let repo = GalleryRepository::new((*state.db).clone());
        assert_eq!(repo.count().await.expect("count"), MAX_IMAGES);
    }
}
