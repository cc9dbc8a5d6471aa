//! Skill routes (JSON).

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

use atelier_db::repositories::{SkillData, SkillRepository};

use crate::AppState;
use crate::error::{ApiResult, not_found, validation};

/// Creates the skill routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_skills).post(create_skill))
        .route("/{id}", get(get_skill).put(update_skill).delete(delete_skill))
}

/// Request body for a skill.
#[derive(Debug, Deserialize)]
struct SkillRequest {
    name: String,
    percentage: i32,
}

impl SkillRequest {
    fn into_data(self) -> Result<SkillData, crate::error::ApiError> {
        if self.name.trim().is_empty() {
            return Err(validation("name is required"));
        }
        if !(0..=100).contains(&self.percentage) {
            return Err(validation("percentage must be between 0 and 100"));
        }
        Ok(SkillData {
            name: self.name,
            percentage: self.percentage,
        })
    }
}

/// GET `/api/skills`: list all skills.
async fn list_skills(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = SkillRepository::new((*state.db).clone());
    Ok(Json(repo.list().await?))
}

/// GET `/api/skills/{id}`: fetch one skill.
async fn get_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = SkillRepository::new((*state.db).clone());
    match repo.find_by_id(id).await? {
        Some(model) => Ok(Json(model)),
        None => Err(not_found("skill")),
    }
}

/// POST `/api/skills`: create a skill.
async fn create_skill(
    State(state): State<AppState>,
    Json(payload): Json<SkillRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = SkillRepository::new((*state.db).clone());
    let model = repo.create(payload.into_data()?).await?;

    info!(id = %model.id, "skill created");
    Ok((StatusCode::CREATED, Json(model)))
}

/// PUT `/api/skills/{id}`: update a skill.
async fn update_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SkillRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = SkillRepository::new((*state.db).clone());
    match repo.update(id, payload.into_data()?).await? {
        Some(model) => Ok(Json(model)),
        None => Err(not_found("skill")),
    }
}

/// DELETE `/api/skills/{id}`: remove a skill.
async fn delete_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = SkillRepository::new((*state.db).clone());
    if !repo.delete(id).await? {
        return Err(not_found("skill"));
    }
    Ok(Json(json!({ "message": "Skill deleted successfully" })))
}
