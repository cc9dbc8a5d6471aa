//! Environment post repository.

use atelier_core::attachment::MediaRef;
use atelier_shared::AppResult;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

use super::db_err;
use crate::entities::environments;
use crate::media::{MediaRefList, ref_into_columns};

/// Final field values for an environment post.
#[derive(Debug, Clone)]
pub struct EnvironmentData {
    /// Post title.
    pub title: String,
    /// Post body.
    pub description: String,
    /// Hero image, if any.
    pub main_image: Option<MediaRef>,
    /// Additional images.
    pub images: Vec<MediaRef>,
    /// Attached videos.
    pub videos: Vec<MediaRef>,
}

/// Environment post repository.
#[derive(Debug, Clone)]
pub struct EnvironmentRepository {
    db: DatabaseConnection,
}

impl EnvironmentRepository {
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all environment posts.
    pub async fn list(&self) -> AppResult<Vec<environments::Model>> {
        environments::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Fetch an environment post by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<environments::Model>> {
        environments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Insert a new environment post.
    pub async fn create(&self, data: EnvironmentData) -> AppResult<environments::Model> {
        let (main_image_url, main_image_key) = ref_into_columns(data.main_image);
        let active = environments::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(data.title),
            description: Set(data.description),
            main_image_url: Set(main_image_url),
            main_image_key: Set(main_image_key),
            images: Set(MediaRefList(data.images)),
            videos: Set(MediaRefList(data.videos)),
        };
        active.insert(&self.db).await.map_err(db_err)
    }

    /// Update an existing environment post in place. Returns None if missing.
    pub async fn update(
        &self,
        id: Uuid,
        data: EnvironmentData,
    ) -> AppResult<Option<environments::Model>> {
        let Some(model) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let (main_image_url, main_image_key) = ref_into_columns(data.main_image);
        let mut active = model.into_active_model();
        active.title = Set(data.title);
        active.description = Set(data.description);
        active.main_image_url = Set(main_image_url);
        active.main_image_key = Set(main_image_key);
        active.images = Set(MediaRefList(data.images));
        active.videos = Set(MediaRefList(data.videos));

        active.update(&self.db).await.map(Some).map_err(db_err)
    }

    /// Delete an environment post. Returns false if missing.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = environments::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
