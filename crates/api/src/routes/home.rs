//! Home page text and link routes (singletons, JSON).

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::info;

use atelier_db::repositories::{HomeLinksData, HomeLinksRepository, HomeTextRepository};

use crate::AppState;
use crate::error::ApiResult;

/// Creates the home page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/text", get(get_text).post(upsert_text))
        .route("/links", get(get_links).post(upsert_links))
}

/// Request body for the home hero text.
#[derive(Debug, Deserialize)]
struct HomeTextRequest {
    text: String,
}

/// GET `/api/home/text`: fetch the hero text singleton, `null` when unset.
async fn get_text(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = HomeTextRepository::new((*state.db).clone());
    Ok(Json(repo.find_one().await?))
}

/// POST `/api/home/text`: create or mutate the hero text singleton.
async fn upsert_text(
    State(state): State<AppState>,
    Json(payload): Json<HomeTextRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = HomeTextRepository::new((*state.db).clone());
    let model = repo.upsert(payload.text).await?;

    info!(id = %model.id, "home text updated");
    Ok(Json(model))
}

/// Request body for the home link set.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HomeLinksRequest {
    general_title: String,
    general_url: String,
    insta_title: String,
    insta_url: String,
}

/// GET `/api/home/links`: fetch the link set singleton, `null` when unset.
async fn get_links(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = HomeLinksRepository::new((*state.db).clone());
    Ok(Json(repo.find_one().await?))
}

/// POST `/api/home/links`: create or mutate the link set singleton.
async fn upsert_links(
    State(state): State<AppState>,
    Json(payload): Json<HomeLinksRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = HomeLinksRepository::new((*state.db).clone());
    let model = repo
        .upsert(HomeLinksData {
            general_title: payload.general_title,
            general_url: payload.general_url,
            insta_title: payload.insta_title,
            insta_url: payload.insta_url,
        })
        .await?;

    info!(id = %model.id, "home links updated");
    Ok(Json(model))
}
