//! Contact card and contact details routes.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use atelier_core::attachment::AttachmentManager;
use atelier_db::media::ref_from_columns;
use atelier_db::repositories::{ContactData, ContactDetailsRepository, ContactRepository};

use crate::AppState;
use crate::error::{ApiResult, not_found};
use crate::forms::FormData;

const NAMESPACE: &str = "Contacts";

/// Creates the contact routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contacts).post(create_contact))
        .route("/details", get(get_details).put(upsert_details))
        .route("/{id}", get(get_contact).put(update_contact).delete(delete_contact))
}

/// GET `/api/contact`: list all contact cards.
async fn list_contacts(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = ContactRepository::new((*state.db).clone());
    Ok(Json(repo.list().await?))
}

/// GET `/api/contact/{id}`: fetch one contact card.
async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = ContactRepository::new((*state.db).clone());
    match repo.find_by_id(id).await? {
        Some(model) => Ok(Json(model)),
        None => Err(not_found("contact")),
    }
}

/// POST `/api/contact`: create a contact card.
///
/// Multipart fields: `heading`, `contactUrl`; optional file `logo`.
async fn create_contact(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;
    let heading = form.require("heading")?;
    let contact_url = form.require("contactUrl")?;

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    let logo = match form.file("logo") {
        Some(file) => Some(media.attach("logos", file).await?),
        None => None,
    };

    let repo = ContactRepository::new((*state.db).clone());
    let model = repo
        .create(ContactData {
            heading,
            contact_url,
            logo,
        })
        .await?;

    info!(id = %model.id, "contact created");
    Ok((StatusCode::CREATED, Json(model)))
}

/// PUT `/api/contact/{id}`: update a contact card, replacing its logo
/// when a new one is uploaded.
async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = FormData::read(multipart).await?;
    let heading = form.require("heading")?;
    let contact_url = form.require("contactUrl")?;

    let repo = ContactRepository::new((*state.db).clone());
    let Some(existing) = repo.find_by_id(id).await? else {
        return Err(not_found("contact"));
    };
    let old_logo = ref_from_columns(existing.logo_url, existing.logo_key);

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    let logo = match media
        .replace("logos", form.file("logo"), old_logo.as_ref())
        .await?
    {
        Some(fresh) => Some(fresh),
        None => old_logo,
    };

    match repo
        .update(
            id,
            ContactData {
                heading,
                contact_url,
                logo,
            },
        )
        .await?
    {
        Some(model) => {
            info!(id = %model.id, "contact updated");
            Ok(Json(model))
        }
        None => Err(not_found("contact")),
    }
}

/// DELETE `/api/contact/{id}`: remove a contact card and its logo.
async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = ContactRepository::new((*state.db).clone());
    let Some(model) = repo.find_by_id(id).await? else {
        return Err(not_found("contact"));
    };

    let media = AttachmentManager::new(state.storage.clone(), NAMESPACE);
    if let Some(logo) = ref_from_columns(model.logo_url, model.logo_key) {
        media.discard(&logo).await;
    }
    repo.delete(id).await?;

    info!(%id, "contact deleted");
    Ok(Json(json!({ "message": "Contact deleted successfully" })))
}

/// Request body for the contact details singleton.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContactDetailsRequest {
    phone_number: String,
    main_id: String,
}

/// GET `/api/contact/details`: fetch the singleton, `null` when unset.
async fn get_details(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = ContactDetailsRepository::new((*state.db).clone());
    Ok(Json(repo.find_one().await?))
}

/// PUT `/api/contact/details`: create or mutate the singleton.
async fn upsert_details(
    State(state): State<AppState>,
    Json(payload): Json<ContactDetailsRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = ContactDetailsRepository::new((*state.db).clone());
    let model = repo.upsert(payload.phone_number, payload.main_id).await?;

    info!(id = %model.id, "contact details updated");
    Ok(Json(model))
}
