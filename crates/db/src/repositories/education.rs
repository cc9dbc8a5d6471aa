//! Education and experience entry repositories.

use atelier_shared::AppResult;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

use super::db_err;
use crate::entities::{education_entries, experience_entries};

/// Final field values for an education entry.
#[derive(Debug, Clone)]
pub struct EducationData {
    /// Degree or qualification name.
    pub degree: String,
    /// Institution name.
    pub school: String,
    /// Year or year range.
    pub year: String,
    /// Grade, free-form.
    pub percentage: String,
}

/// Education entry repository.
#[derive(Debug, Clone)]
pub struct EducationRepository {
    db: DatabaseConnection,
}

impl EducationRepository {
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all education entries.
    pub async fn list(&self) -> AppResult<Vec<education_entries::Model>> {
        education_entries::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Fetch an education entry by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<education_entries::Model>> {
        education_entries::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Insert a new education entry.
    pub async fn create(&self, data: EducationData) -> AppResult<education_entries::Model> {
        let active = education_entries::ActiveModel {
            id: Set(Uuid::new_v4()),
            degree: Set(data.degree),
            school: Set(data.school),
            year: Set(data.year),
            percentage: Set(data.percentage),
        };
        active.insert(&self.db).await.map_err(db_err)
    }

    /// Update an existing education entry. Returns None if missing.
    pub async fn update(
        &self,
        id: Uuid,
        data: EducationData,
    ) -> AppResult<Option<education_entries::Model>> {
        let Some(model) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.degree = Set(data.degree);
        active.school = Set(data.school);
        active.year = Set(data.year);
        active.percentage = Set(data.percentage);

        active.update(&self.db).await.map(Some).map_err(db_err)
    }

    /// Delete an education entry. Returns false if missing.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = education_entries::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}

/// Final field values for an experience entry.
#[derive(Debug, Clone)]
pub struct ExperienceData {
    /// Role title.
    pub position: String,
    /// Employer name.
    pub company: String,
    /// Year or year range.
    pub years: String,
    /// What the role involved.
    pub description: String,
}

/// Experience entry repository.
#[derive(Debug, Clone)]
pub struct ExperienceRepository {
    db: DatabaseConnection,
}

impl ExperienceRepository {
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all experience entries.
    pub async fn list(&self) -> AppResult<Vec<experience_entries::Model>> {
        experience_entries::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Fetch an experience entry by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<experience_entries::Model>> {
        experience_entries::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Insert a new experience entry.
    pub async fn create(&self, data: ExperienceData) -> AppResult<experience_entries::Model> {
        let active = experience_entries::ActiveModel {
            id: Set(Uuid::new_v4()),
            position: Set(data.position),
            company: Set(data.company),
            years: Set(data.years),
            description: Set(data.description),
        };
        active.insert(&self.db).await.map_err(db_err)
    }

    /// Update an existing experience entry. Returns None if missing.
    pub async fn update(
        &self,
        id: Uuid,
        data: ExperienceData,
    ) -> AppResult<Option<experience_entries::Model>> {
        let Some(model) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.position = Set(data.position);
        active.company = Set(data.company);
        active.years = Set(data.years);
        active.description = Set(data.description);

        active.update(&self.db).await.map(Some).map_err(db_err)
    }

    /// Delete an experience entry. Returns false if missing.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = experience_entries::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
