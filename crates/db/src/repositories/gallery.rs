//! Image gallery repository.

use atelier_core::attachment::MediaRef;
use atelier_shared::AppResult;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use uuid::Uuid;

use super::db_err;
use crate::entities::gallery_images;

/// Image gallery repository.
#[derive(Debug, Clone)]
pub struct GalleryRepository {
    db: DatabaseConnection,
}

impl GalleryRepository {
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all gallery images, newest first.
    pub async fn list(&self) -> AppResult<Vec<gallery_images::Model>> {
        gallery_images::Entity::find()
            .order_by_desc(gallery_images::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Count stored gallery images.
    pub async fn count(&self) -> AppResult<u64> {
        gallery_images::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    /// Fetch a gallery image by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<gallery_images::Model>> {
        gallery_images::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Insert a new gallery image record.
    pub async fn insert(
        &self,
        filename: String,
        image: MediaRef,
    ) -> AppResult<gallery_images::Model> {
        let active = gallery_images::ActiveModel {
            id: Set(Uuid::new_v4()),
            filename: Set(filename),
            image_url: Set(image.url),
            image_key: Set(image.key),
            created_at: Set(Utc::now().into()),
        };
        active.insert(&self.db).await.map_err(db_err)
    }

    /// Delete a gallery image record. Returns false if missing.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = gallery_images::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
