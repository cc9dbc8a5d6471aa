//! Competence routes.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use atelier_core::attachment::AttachmentManager;
use atelier_db::media::ref_from_columns;
use atelier_db::repositories::{CompetenceData, CompetenceRepository};

use crate::AppState;
use crate::error::{ApiResult, not_found};
use crate::forms::FormData;

const NAMESPACE: &str = "Competences";

/// Creates the competence routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_competences).post(create_competence))
        .route(
            "/{id}",
            get(get_competence)
                .put(update_competence)
                .delete(delete_competence),
        )
}

/// GET `/api/competence`: list all competences.
async fn list_competences(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = CompetenceRepository::new((*state.db).clone());
    Ok(Json(repo.list().await?))
}

/// GET `/api/competence/{id}`: fetch one competence.
async fn get_competence(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = CompetenceRepository::new((*state.db).clone());
    match repo.find_by_id(id).await? {
        Some(model) => Ok(Json(model)),
        None => Err(not_found("competence")),
    }
}

/// POST `/api/competence`: create a competence.
///
/// Multipart fields: `title`; optional file `image`.
async fn create_competence(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;
    let title = form.require("title")?;

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    let image = match form.file("image") {
        Some(file) => Some(media.attach("images", file).await?),
        None => None,
    };

    let repo = CompetenceRepository::new((*state.db).clone());
    let model = repo.create(CompetenceData { title, image }).await?;

    info!(id = %model.id, "competence created");
    Ok((StatusCode::CREATED, Json(model)))
}

/// PUT `/api/competence/{id}`: update a competence, replacing its image
/// when a new one is uploaded.
async fn update_competence(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;
    let title = form.require("title")?;

    let repo = CompetenceRepository::new((*state.db).clone());
    let Some(existing) = repo.find_by_id(id).await? else {
        return Err(not_found("competence"));
    };
    let old_image = ref_from_columns(existing.image_url, existing.image_key);

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    let image = match media
        .replace("images", form.file("image"), old_image.as_ref())
        .await?
    {
        Some(fresh) => Some(fresh),
        None => old_image,
    };

    match repo.update(id, CompetenceData { title, image }).await? {
        Some(model) => {
            info!(id = %model.id, "competence updated");
            Ok(Json(model))
        }
        None => Err(not_found("competence")),
    }
}

/// DELETE `/api/competence/{id}`: remove a competence and its image.
async fn delete_competence(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = CompetenceRepository::new((*state.db).clone());
    let Some(model) = repo.find_by_id(id).await? else {
        return Err(not_found("competence"));
    };

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    if let Some(image) = ref_from_columns(model.image_url, model.image_key) {
        media.discard(&image).await;
    }
    repo.delete(id).await?;

    info!(%id, "competence deleted");
    Ok(Json(json!({ "message": "Competence deleted successfully" })))
}
