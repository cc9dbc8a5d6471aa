//! Script portfolio routes.

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

use atelier_core::attachment::{AttachmentManager, MediaRef};
use atelier_db::repositories::{ScriptData, ScriptRepository};

use crate::AppState;
use crate::error::{ApiResult, not_found, validation};
use crate::forms::FormData;

const NAMESPACE: &str = "Scripts";

/// Creates the script routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_scripts).post(create_script))
        .route(
            "/{id}",
            get(get_script).put(update_script).delete(delete_script),
        )
}

/// GET `/api/scripts`: list all scripts.
async fn list_scripts(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = ScriptRepository::new((*state.db).clone());
    Ok(Json(repo.list().await?))
}

/// GET `/api/scripts/{id}`: fetch one script.
async fn get_script(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = ScriptRepository::new((*state.db).clone());
    match repo.find_by_id(id).await? {
        Some(model) => Ok(Json(model)),
        None => Err(not_found("script")),
    }
}

/// POST `/api/scripts`: create a script.
///
/// Multipart fields: `title`, `description`; required files `image` and
/// `pdf`. If the pdf upload fails the already-written image is removed so
/// the failed request leaves no orphan.
async fn create_script(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;
    let title = form.require("title")?;
    let description = form.require("description")?;
    let image_file = form.file("image").ok_or_else(|| validation("image is required"))?;
    let pdf_file = form.file("pdf").ok_or_else(|| validation("pdf is required"))?;

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    let image = media.attach("images", image_file).await?;
    let pdf = match media.attach("pdfs", pdf_file).await {
        Ok(pdf) => pdf,
        Err(e) => {
            media.discard(&image).await;
            return Err(e.into());
        }
    };

    let repo = ScriptRepository::new((*state.db).clone());
    let model = repo
        .create(ScriptData {
            title,
            description,
            image,
            pdf,
        })
        .await?;

    info!(id = %model.id, "script created");
    Ok((StatusCode::CREATED, Json(model)))
}

/// PUT `/api/scripts/{id}`: update a script, replacing either attachment
/// when a new file is uploaded.
async fn update_script(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;
    let title = form.require("title")?;
    let description = form.require("description")?;

    let repo = ScriptRepository::new((*state.db).clone());
    let Some(existing) = repo.find_by_id(id).await? else {
        return Err(not_found("script"));
    };
    let old_image = MediaRef::new(existing.image_url, existing.image_key);
    let old_pdf = MediaRef::new(existing.pdf_url, existing.pdf_key);

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    let image = match media
        .replace("images", form.file("image"), Some(&old_image))
        .await?
    {
        Some(fresh) => fresh,
        None => old_image,
    };
    let pdf = match media
        .replace("pdfs", form.file("pdf"), Some(&old_pdf))
        .await?
    {
        Some(fresh) => fresh,
        None => old_pdf,
    };

    match repo
        .update(
            id,
            ScriptData {
                title,
                description,
                image,
                pdf,
            },
        )
        .await?
    {
        Some(model) => {
            info!(id = %model.id, "script updated");
            Ok(Json(model))
        }
        None => Err(not_found("script")),
    }
}

/// DELETE `/api/scripts/{id}`: remove a script along with its image and
/// pdf blobs.
async fn delete_script(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = ScriptRepository::new((*state.db).clone());
    let Some(model) = repo.find_by_id(id).await? else {
        return Err(not_found("script"));
    };

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    media.discard(&MediaRef::new(model.image_url, model.image_key)).await;
    media.discard(&MediaRef::new(model.pdf_url, model.pdf_key)).await;
    repo.delete(id).await?;

    info!(%id, "script deleted");
    Ok(Json(json!({ "message": "Script deleted successfully" })))
}
