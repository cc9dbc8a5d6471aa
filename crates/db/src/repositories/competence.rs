//! Competence repository.

use atelier_core::attachment::MediaRef;
use atelier_shared::AppResult;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

use super::db_err;
use crate::entities::competences;
use crate::media::ref_into_columns;

/// Final field values for a competence.
#[derive(Debug, Clone)]
pub struct CompetenceData {
    /// Competence title.
    pub title: String,
    /// Icon image, if any.
    pub image: Option<MediaRef>,
}

/// Competence repository.
#[derive(Debug, Clone)]
pub struct CompetenceRepository {
    db: DatabaseConnection,
}

impl CompetenceRepository {
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all competences.
    pub async fn list(&self) -> AppResult<Vec<competences::Model>> {
        competences::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Fetch a competence by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<competences::Model>> {
        competences::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Insert a new competence.
    pub async fn create(&self, data: CompetenceData) -> AppResult<competences::Model> {
        let (image_url, image_key) = ref_into_columns(data.image);
        let active = competences::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(data.title),
            image_url: Set(image_url),
            image_key: Set(image_key),
        };
        active.insert(&self.db).await.map_err(db_err)
    }

    /// Update an existing competence in place. Returns None if missing.
    pub async fn update(
        &self,
        id: Uuid,
        data: CompetenceData,
    ) -> AppResult<Option<competences::Model>> {
        let Some(model) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let (image_url, image_key) = ref_into_columns(data.image);
        let mut active = model.into_active_model();
        active.title = Set(data.title);
        active.image_url = Set(image_url);
        active.image_key = Set(image_key);

        active.update(&self.db).await.map(Some).map_err(db_err)
    }

    /// Delete a competence. Returns false if missing.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = competences::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
