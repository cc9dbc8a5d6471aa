//! Strength repository.

use atelier_shared::AppResult;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

use super::db_err;
use crate::entities::strengths;

/// Final field values for a strength.
#[derive(Debug, Clone)]
pub struct StrengthData {
    /// Strength name.
    pub name: String,
    /// Self-rating, 0 to 100.
    pub percentage: i32,
}

/// Strength repository.
#[derive(Debug, Clone)]
pub struct StrengthRepository {
    db: DatabaseConnection,
}

impl StrengthRepository {
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all strengths.
    pub async fn list(&self) -> AppResult<Vec<strengths::Model>> {
        strengths::Entity::find().all(&self.db).await.map_err(db_err)
    }

    /// Fetch a strength by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<strengths::Model>> {
        strengths::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Insert a new strength.
    pub async fn create(&self, data: StrengthData) -> AppResult<strengths::Model> {
        let active = strengths::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            percentage: Set(data.percentage),
        };
        active.insert(&self.db).await.map_err(db_err)
    }

    /// Update an existing strength. Returns None if missing.
    pub async fn update(&self, id: Uuid, data: StrengthData) -> AppResult<Option<strengths::Model>> {
        let Some(model) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.name = Set(data.name);
        active.percentage = Set(data.percentage);

        active.update(&self.db).await.map(Some).map_err(db_err)
    }

    /// Delete a strength. Returns false if missing.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = strengths::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
