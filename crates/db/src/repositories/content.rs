//! Content post repository.

use atelier_core::attachment::MediaRef;
use atelier_shared::AppResult;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set};
use uuid::Uuid;

use super::db_err;
use crate::entities::contents;
use crate::media::{MediaRefList, ref_into_columns};

/// Final field values for a content post.
#[derive(Debug, Clone)]
pub struct ContentData {
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

/// Content post repository.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    db: DatabaseConnection,
}

impl ContentRepository {
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all content posts, newest first.
    pub async fn list(&self) -> AppResult<Vec<contents::Model>> {
        contents::Entity::find()
            .order_by_desc(contents::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Fetch a content post by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<contents::Model>> {
        contents::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Insert a new content post.
    pub async fn create(&self, data: ContentData) -> AppResult<contents::Model> {
        let (main_image_url, main_image_key) = ref_into_columns(data.main_image);
        let now = Utc::now();
        let active = contents::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(data.title),
            description: Set(data.description),
            main_image_url: Set(main_image_url),
            main_image_key: Set(main_image_key),
            images: Set(MediaRefList(data.images)),
            videos: Set(MediaRefList(data.videos)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        active.insert(&self.db).await.map_err(db_err)
    }

    /// Update an existing content post in place. Returns None if missing.
    pub async fn update(&self, id: Uuid, data: ContentData) -> AppResult<Option<contents::Model>> {
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
        active.updated_at = Set(Utc::now().into());

        active.update(&self.db).await.map(Some).map_err(db_err)
    }

    /// Delete a content post. Returns false if missing.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = contents::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
