//! Education and experience entry routes (JSON, no media).

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

use atelier_db::repositories::{
    EducationData, EducationRepository, ExperienceData, ExperienceRepository,
};

use crate::AppState;
use crate::error::{ApiResult, not_found};

/// Creates the education entry routes.
pub fn education_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_education).post(create_education))
        .route("/{id}", get(get_education).put(update_education).delete(delete_education))
}

/// Creates the experience entry routes.
pub fn experience_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_experience).post(create_experience))
        .route(
            "/{id}",
            get(get_experience).put(update_experience).delete(delete_experience),
        )
}

/// Request body for an education entry.
#[derive(Debug, Deserialize)]
struct EducationRequest {
    degree: String,
    school: String,
    year: String,
    percentage: String,
}

impl From<EducationRequest> for EducationData {
    fn from(r: EducationRequest) -> Self {
        Self {
            degree: r.degree,
            school: r.school,
            year: r.year,
            percentage: r.percentage,
        }
    }
}

/// GET `/api/education`: list all education entries.
async fn list_education(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = EducationRepository::new((*state.db).clone());
    Ok(Json(repo.list().await?))
}

/// GET `/api/education/{id}`: fetch one education entry.
async fn get_education(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = EducationRepository::new((*state.db).clone());
    match repo.find_by_id(id).await? {
        Some(model) => Ok(Json(model)),
        None => Err(not_found("education entry")),
    }
}

/// POST `/api/education`: create an education entry.
async fn create_education(
    State(state): State<AppState>,
    Json(payload): Json<EducationRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = EducationRepository::new((*state.db).clone());
    let model = repo.create(payload.into()).await?;

    info!(id = %model.id, "education entry created");
    Ok((StatusCode::CREATED, Json(model)))
}

/// PUT `/api/education/{id}`: update an education entry.
async fn update_education(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EducationRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = EducationRepository::new((*state.db).clone());
    match repo.update(id, payload.into()).await? {
        Some(model) => Ok(Json(model)),
        None => Err(not_found("education entry")),
    }
}

/// DELETE `/api/education/{id}`: remove an education entry.
async fn delete_education(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = EducationRepository::new((*state.db).clone());
    if !repo.delete(id).await? {
        return Err(not_found("education entry"));
    }
    Ok(Json(json!({ "message": "Education entry deleted successfully" })))
}

/// Request body for an experience entry.
#[derive(Debug, Deserialize)]
struct ExperienceRequest {
    position: String,
    company: String,
    years: String,
    description: String,
}

impl From<ExperienceRequest> for ExperienceData {
    fn from(r: ExperienceRequest) -> Self {
        Self {
            position: r.position,
            company: r.company,
            years: r.years,
            description: r.description,
        }
    }
}

/// GET `/api/experience`: list all experience entries.
async fn list_experience(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = ExperienceRepository::new((*state.db).clone());
    Ok(Json(repo.list().await?))
}

/// GET `/api/experience/{id}`: fetch one experience entry.
async fn get_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = ExperienceRepository::new((*state.db).clone());
    match repo.find_by_id(id).await? {
        Some(model) => Ok(Json(model)),
        None => Err(not_found("experience entry")),
    }
}

/// POST `/api/experience`: create an experience entry.
async fn create_experience(
    State(state): State<AppState>,
    Json(payload): Json<ExperienceRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = ExperienceRepository::new((*state.db).clone());
    let model = repo.create(payload.into()).await?;

    info!(id = %model.id, "experience entry created");
    Ok((StatusCode::CREATED, Json(model)))
}

/// PUT `/api/experience/{id}`: update an experience entry.
async fn update_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ExperienceRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = ExperienceRepository::new((*state.db).clone());
    match repo.update(id, payload.into()).await? {
        Some(model) => Ok(Json(model)),
        None => Err(not_found("experience entry")),
    }
}

/// DELETE `/api/experience/{id}`: remove an experience entry.
async fn delete_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = ExperienceRepository::new((*state.db).clone());
    if !repo.delete(id).await? {
        return Err(not_found("experience entry"));
    }
    Ok(Json(json!({ "message": "Experience entry deleted successfully" })))
}
