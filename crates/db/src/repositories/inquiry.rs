//! Visitor inquiry repository.

use atelier_shared::AppResult;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::db_err;
use crate::entities::inquiries;

/// Final field values for an inquiry.
#[derive(Debug, Clone)]
pub struct InquiryData {
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Category of the inquiry, if given.
    pub inquiry_type: Option<String>,
    /// Budget estimate, if given.
    pub budget: Option<String>,
    /// Message body.
    pub message: String,
}

/// Visitor inquiry repository.
#[derive(Debug, Clone)]
pub struct InquiryRepository {
    db: DatabaseConnection,
}

impl InquiryRepository {
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all inquiries, newest first.
    pub async fn list(&self) -> AppResult<Vec<inquiries::Model>> {
        inquiries::Entity::find()
            .order_by_desc(inquiries::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Record a new inquiry.
    pub async fn create(&self, data: InquiryData) -> AppResult<inquiries::Model> {
        let active = inquiries::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            email: Set(data.email),
            inquiry_type: Set(data.inquiry_type),
            budget: Set(data.budget),
            message: Set(data.message),
            created_at: Set(Utc::now().into()),
        };
        active.insert(&self.db).await.map_err(db_err)
    }

    /// Delete an inquiry. Returns false if missing.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = inquiries::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
