//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod about;
pub mod competence;
pub mod contact;
pub mod content;
pub mod education;
pub mod environment;
pub mod gallery;
pub mod health;
pub mod home;
pub mod inquiries;
pub mod scripts;
pub mod skills;
pub mod strength;
pub mod video;

/// Creates the `/api` router with all content-type routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/about", about::routes())
        .nest("/competence", competence::routes())
        .nest("/contact", contact::routes())
        .nest("/content", content::routes())
        .nest("/education", education::education_routes())
        .nest("/experience", education::experience_routes())
        .nest("/environment", environment::routes())
        .nest("/home", home::routes())
        .nest("/images", gallery::routes())
        .nest("/queries", inquiries::routes())
        .nest("/scripts", scripts::routes())
        .nest("/skills", skills::routes())
        .nest("/strength", strength::routes())
        .nest("/video", video::routes())
}
