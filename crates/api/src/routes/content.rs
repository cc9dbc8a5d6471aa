//! Content post routes.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::info;
use uuid::Uuid;

use atelier_core::attachment::AttachmentManager;
use atelier_db::media::ref_from_columns;
use atelier_db::repositories::{ContentData, ContentRepository};

use crate::AppState;
use crate::error::{ApiResult, not_found};
use crate::forms::FormData;

const NAMESPACE: &str = "Content";

/// Creates the content post routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_content).post(create_content))
        .route(
            "/{id}",
            get(get_content).put(update_content).delete(delete_content),
        )
}

/// GET `/api/content`: list all content posts.
async fn list_content(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = ContentRepository::new((*state.db).clone());
    Ok(Json(repo.list().await?))
}

/// GET `/api/content/{id}`: fetch one content post.
async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = ContentRepository::new((*state.db).clone());
    match repo.find_by_id(id).await? {
        Some(model) => Ok(Json(model)),
        None => Err(not_found("content")),
    }
}

/// POST `/api/content`: create a content post.
///
/// Multipart fields: `title`, `description`; optional file `mainImages`,
/// optional file arrays `images` and `videos`.
async fn create_content(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;
    let title = form.require("title")?;
    let description = form.require("description")?;

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    let main_image = match form.file("mainImages") {
        Some(file) => Some(media.attach("mainImages", file).await?),
        None => None,
    };
    let images = match media.replace_all("images", form.files("images"), &[]).await {
        Ok(fresh) => fresh.unwrap_or_default(),
        Err(e) => {
            // The post does not exist yet; its main image must not outlive
            // the failed batch either.
            if let Some(main) = &main_image {
                media.discard(main).await;
            }
            return Err(e.into());
        }
    };
    let videos = match media.replace_all("videos", form.files("videos"), &[]).await {
        Ok(fresh) => fresh.unwrap_or_default(),
        Err(e) => {
            if let Some(main) = &main_image {
                media.discard(main).await;
            }
            media.discard_all(&images).await;
            return Err(e.into());
        }
    };

    let repo = ContentRepository::new((*state.db).clone());
    let model = repo
        .create(ContentData {
            title,
            description,
            main_image,
            images,
            videos,
        })
        .await?;

    info!(id = %model.id, "content created");
    Ok((StatusCode::CREATED, Json(model)))
}

/// PUT `/api/content/{id}`: update a content post in place.
///
/// A non-empty `images` or `videos` upload fully replaces that array; an
/// absent one keeps the stored array. Same for `mainImages`.
async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;
    let title = form.require("title")?;
    let description = form.require("description")?;

    let repo = ContentRepository::new((*state.db).clone());
    let Some(existing) = repo.find_by_id(id).await? else {
        return Err(not_found("content"));
    };
    let old_main = ref_from_columns(existing.main_image_url, existing.main_image_key);

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    let main_image = match media
        .replace("mainImages", form.file("mainImages"), old_main.as_ref())
        .await?
    {
        Some(fresh) => Some(fresh),
        None => old_main,
    };
    let images = match media
        .replace_all("images", form.files("images"), existing.images.as_slice())
        .await?
    {
        Some(fresh) => fresh,
        None => existing.images.0,
    };
    let videos = match media
        .replace_all("videos", form.files("videos"), existing.videos.as_slice())
        .await?
    {
        Some(fresh) => fresh,
        None => existing.videos.0,
    };

    match repo
        .update(
            id,
            ContentData {
                title,
                description,
                main_image,
                images,
                videos,
            },
        )
        .await?
    {
        Some(model) => {
            info!(id = %model.id, "content updated");
            Ok(Json(model))
        }
        None => Err(not_found("content")),
    }
}

/// DELETE `/api/content/{id}`: remove a content post and every blob it
/// references.
async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = ContentRepository::new((*state.db).clone());
    let Some(model) = repo.find_by_id(id).await? else {
        return Err(not_found("content"));
    };

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    if let Some(main) = ref_from_columns(model.main_image_url, model.main_image_key) {
        media.discard(&main).await;
    }
    media.discard_all(model.images.as_slice()).await;
    media.discard_all(model.videos.as_slice()).await;
    repo.delete(id).await?;

    info!(%id, "content deleted");
    Ok(StatusCode::NO_CONTENT)
}
