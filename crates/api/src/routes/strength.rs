//! Strength routes (JSON).

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

use atelier_db::repositories::{StrengthData, StrengthRepository};

use crate::AppState;
use crate::error::{ApiResult, not_found, validation};

/// Creates the strength routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_strengths).post(create_strength))
        .route(
            "/{id}",
            get(get_strength).put(update_strength).delete(delete_strength),
        )
}

/// Request body for a strength.
#[derive(Debug, Deserialize)]
struct StrengthRequest {
    name: String,
    percentage: i32,
}

impl StrengthRequest {
    fn into_data(self) -> Result<StrengthData, crate::error::ApiError> {
        if self.name.trim().is_empty() {
            return Err(validation("name is required"));
        }
        if !(0..=100).contains(&self.percentage) {
            return Err(validation("percentage must be between 0 and 100"));
        }
        Ok(StrengthData {
            name: self.name,
            percentage: self.percentage,
        })
    }
}

/// GET `/api/strength`: list all strengths.
async fn list_strengths(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = StrengthRepository::new((*state.db).clone());
    Ok(Json(repo.list().await?))
}

/// GET `/api/strength/{id}`: fetch one strength.
async fn get_strength(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = StrengthRepository::new((*state.db).clone());
    match repo.find_by_id(id).await? {
        Some(model) => Ok(Json(model)),
        None => Err(not_found("strength")),
    }
}

/// POST `/api/strength`: create a strength.
async fn create_strength(
    State(state): State<AppState>,
    Json(payload): Json<StrengthRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = StrengthRepository::new((*state.db).clone());
    let model = repo.create(payload.into_data()?).await?;

    info!(id = %model.id, "strength created");
    Ok((StatusCode::CREATED, Json(model)))
}

/// PUT `/api/strength/{id}`: update a strength.
async fn update_strength(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StrengthRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = StrengthRepository::new((*state.db).clone());
    match repo.update(id, payload.into_data()?).await? {
        Some(model) => Ok(Json(model)),
        None => Err(not_found("strength")),
    }
}

/// DELETE `/api/strength/{id}`: remove a strength.
async fn delete_strength(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = StrengthRepository::new((*state.db).clone());
    if !repo.delete(id).await? {
        return Err(not_found("strength"));
    }
    Ok(Json(json!({ "message": "Strength deleted successfully" })))
}
