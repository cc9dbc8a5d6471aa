//! About page routes (singleton).

use axum::{
    Json, Router,
    extract::{Multipart, State},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tracing::info;

use atelier_core::attachment::AttachmentManager;
use atelier_db::media::ref_from_columns;
use atelier_db::repositories::{AboutData, AboutRepository};

use crate::AppState;
use crate::error::{ApiResult, not_found};
use crate::forms::FormData;

const NAMESPACE: &str = "Aboutpage";

/// Creates the about page routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_about).post(upsert_about).delete(delete_about))
}

/// GET `/api/about`: fetch the singleton, `null` when unset.
async fn get_about(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = AboutRepository::new((*state.db).clone());
    Ok(Json(repo.find_one().await?))
}

/// POST `/api/about`: create or replace the singleton.
///
/// Multipart fields: `subheading`, `description`, `purpleText`; optional
/// files `image` and `pdf`. An absent file keeps the current attachment;
/// a present one is uploaded before the superseded object is deleted.
async fn upsert_about(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;
    let subheading = form.require("subheading")?;
    let description = form.require("description")?;
    let purple_text = form.require("purpleText")?;

    let repo = AboutRepository::new((*state.db).clone());
    let existing = repo.find_one().await?;
    let (old_image, old_pdf) = existing.map_or((None, None), |m| {
        (
            ref_from_columns(m.image_url, m.image_key),
            ref_from_columns(m.pdf_url, m.pdf_key),
        )
    });

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    let image = match media
        .replace("images", form.file("image"), old_image.as_ref())
        .await?
    {
        Some(fresh) => Some(fresh),
        None => old_image,
    };
    let pdf = match media
        .replace("pdfs", form.file("pdf"), old_pdf.as_ref())
        .await?
    {
        Some(fresh) => Some(fresh),
        None => old_pdf,
    };

    let model = repo
        .upsert(AboutData {
            subheading,
            description,
            purple_text,
            image,
            pdf,
        })
        .await?;

    info!(id = %model.id, "about page updated");
    Ok(Json(model))
}

/// DELETE `/api/about`: remove the singleton and its media.
async fn delete_about(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = AboutRepository::new((*state.db).clone());
    let Some(model) = repo.find_one().await? else {
        return Err(not_found("about page"));
    };

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    if let Some(image) = ref_from_columns(model.image_url, model.image_key) {
        media.discard(&image).await;
    }
    if let Some(pdf) = ref_from_columns(model.pdf_url, model.pdf_key) {
        media.discard(&pdf).await;
    }
    repo.delete(model.id).await?;

    info!(id = %model.id, "about page deleted");
    Ok(Json(json!({ "message": "About page deleted successfully" })))
}
