//! Script portfolio repository.

use atelier_core::attachment::MediaRef;
use atelier_shared::AppResult;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

use super::db_err;
use crate::entities::scripts;

/// Final field values for a script. Both attachments are required.
#[derive(Debug, Clone)]
pub struct ScriptData {
    /// Script title.
    pub title: String,
    /// Synopsis text.
    pub description: String,
    /// Cover image.
    pub image: MediaRef,
    /// Script PDF.
    pub pdf: MediaRef,
}

/// Script portfolio repository.
#[derive(Debug, Clone)]
pub struct ScriptRepository {
    db: DatabaseConnection,
}

impl ScriptRepository {
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all scripts.
    pub async fn list(&self) -> AppResult<Vec<scripts::Model>> {
        scripts::Entity::find().all(&self.db).await.map_err(db_err)
    }

    /// Fetch a script by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<scripts::Model>> {
        scripts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Insert a new script.
    pub async fn create(&self, data: ScriptData) -> AppResult<scripts::Model> {
        let active = scripts::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(data.title),
            description: Set(data.description),
            image_url: Set(data.image.url),
            image_key: Set(data.image.key),
            pdf_url: Set(data.pdf.url),
            pdf_key: Set(data.pdf.key),
        };
        active.insert(&self.db).await.map_err(db_err)
    }

    /// Update an existing script in place. Returns None if missing.
    pub async fn update(&self, id: Uuid, data: ScriptData) -> AppResult<Option<scripts::Model>> {
        let Some(model) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.title = Set(data.title);
        active.description = Set(data.description);
        active.image_url = Set(data.image.url);
        active.image_key = Set(data.image.key);
        active.pdf_url = Set(data.pdf.url);
        active.pdf_key = Set(data.pdf.key);

        active.update(&self.db).await.map(Some).map_err(db_err)
    }

    /// Delete a script. Returns false if missing.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = scripts::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
