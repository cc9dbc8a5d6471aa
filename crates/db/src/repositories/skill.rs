//! Skill repository.

use atelier_shared::AppResult;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

use super::db_err;
use crate::entities::skills;

/// Final field values for a skill.
#[derive(Debug, Clone)]
pub struct SkillData {
    /// Skill name.
    pub name: String,
    /// Proficiency, 0 to 100.
    pub percentage: i32,
}

/// Skill repository.
#[derive(Debug, Clone)]
pub struct SkillRepository {
    db: DatabaseConnection,
}

impl SkillRepository {
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all skills.
    pub async fn list(&self) -> AppResult<Vec<skills::Model>> {
        skills::Entity::find().all(&self.db).await.map_err(db_err)
    }

    /// Fetch a skill by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<skills::Model>> {
        skills::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Insert a new skill.
    pub async fn create(&self, data: SkillData) -> AppResult<skills::Model> {
        let active = skills::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            percentage: Set(data.percentage),
        };
        active.insert(&self.db).await.map_err(db_err)
    }

    /// Update an existing skill. Returns None if missing.
    pub async fn update(&self, id: Uuid, data: SkillData) -> AppResult<Option<skills::Model>> {
        let Some(model) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.name = Set(data.name);
        active.percentage = Set(data.percentage);

        active.update(&self.db).await.map(Some).map_err(db_err)
    }

    /// Delete a skill. Returns false if missing.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = skills::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
