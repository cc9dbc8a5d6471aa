//! Visitor inquiry routes (JSON).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use atelier_db::repositories::{InquiryData, InquiryRepository};

use crate::AppState;
use crate::error::{ApiResult, not_found, validation};

/// Creates the inquiry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inquiries).post(create_inquiry))
        .route("/{id}", axum::routing::delete(delete_inquiry))
}

/// Request body for a visitor inquiry.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct InquiryRequest {
    #[validate(length(min = 1, message = "name is required"))]
    name: String,
    #[validate(email(message = "email must be a valid address"))]
    email: String,
    inquiry_type: Option<String>,
    budget: Option<String>,
    #[validate(length(min = 1, message = "message is required"))]
    message: String,
}

/// GET `/api/queries`: list all inquiries, newest first.
async fn list_inquiries(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = InquiryRepository::new((*state.db).clone());
    Ok(Json(repo.list().await?))
}

/// POST `/api/queries`: record a visitor inquiry.
async fn create_inquiry(
    State(state): State<AppState>,
    Json(payload): Json<InquiryRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate().map_err(|e| validation(e.to_string()))?;

    let repo = InquiryRepository::new((*state.db).clone());
    let model = repo
        .create(InquiryData {
            name: payload.name,
            email: payload.email,
            inquiry_type: payload.inquiry_type,
            budget: payload.budget,
            message: payload.message,
        })
        .await?;

    info!(id = %model.id, "inquiry recorded");
    Ok((StatusCode::CREATED, Json(model)))
}

/// DELETE `/api/queries/{id}`: remove an inquiry.
async fn delete_inquiry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = InquiryRepository::new((*state.db).clone());
    if !repo.delete(id).await? {
        return Err(not_found("inquiry"));
    }

    info!(%id, "inquiry deleted");
    Ok(Json(json!({ "message": "Inquiry deleted successfully" })))
}
