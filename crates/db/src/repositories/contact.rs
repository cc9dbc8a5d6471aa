//! Contact card and contact details repositories.

use atelier_core::attachment::MediaRef;
use atelier_shared::AppResult;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

use super::db_err;
use crate::entities::{contact_details, contacts};
use crate::media::ref_into_columns;

/// Final field values for a contact card.
#[derive(Debug, Clone)]
pub struct ContactData {
    /// Display heading.
    pub heading: String,
    /// Link target.
    pub contact_url: String,
    /// Logo image, if any.
    pub logo: Option<MediaRef>,
}

/// Contact card repository.
#[derive(Debug, Clone)]
pub struct ContactRepository {
    db: DatabaseConnection,
}

impl ContactRepository {
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all contact cards.
    pub async fn list(&self) -> AppResult<Vec<contacts::Model>> {
        contacts::Entity::find().all(&self.db).await.map_err(db_err)
    }

    /// Fetch a contact card by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<contacts::Model>> {
        contacts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Insert a new contact card.
    pub async fn create(&self, data: ContactData) -> AppResult<contacts::Model> {
        let (logo_url, logo_key) = ref_into_columns(data.logo);
        let active = contacts::ActiveModel {
            id: Set(Uuid::new_v4()),
            heading: Set(data.heading),
            contact_url: Set(data.contact_url),
            logo_url: Set(logo_url),
            logo_key: Set(logo_key),
        };
        active.insert(&self.db).await.map_err(db_err)
    }

    /// Update an existing contact card in place. Returns None if missing.
    pub async fn update(&self, id: Uuid, data: ContactData) -> AppResult<Option<contacts::Model>> {
        let Some(model) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let (logo_url, logo_key) = ref_into_columns(data.logo);
        let mut active = model.into_active_model();
        active.heading = Set(data.heading);
        active.contact_url = Set(data.contact_url);
        active.logo_url = Set(logo_url);
        active.logo_key = Set(logo_key);

        active.update(&self.db).await.map(Some).map_err(db_err)
    }

    /// Delete a contact card. Returns false if missing.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = contacts::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}

/// Site-wide contact details repository (singleton, findOne-then-upsert).
#[derive(Debug, Clone)]
pub struct ContactDetailsRepository {
    db: DatabaseConnection,
}

impl ContactDetailsRepository {
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetch the singleton instance, if one exists.
    pub async fn find_one(&self) -> AppResult<Option<contact_details::Model>> {
        contact_details::Entity::find()
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Create or mutate the singleton instance.
    pub async fn upsert(
        &self,
        phone_number: String,
        main_id: String,
    ) -> AppResult<contact_details::Model> {
        match self.find_one().await? {
            Some(model) => {
                let mut active = model.into_active_model();
                active.phone_number = Set(phone_number);
                active.main_id = Set(main_id);
                active.update(&self.db).await.map_err(db_err)
            }
            None => {
                let active = contact_details::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    phone_number: Set(phone_number),
                    main_id: Set(main_id),
                };
                active.insert(&self.db).await.map_err(db_err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::sqlite_db;

    #[tokio::test]
    async fn test_details_upsert_keeps_one_row() {
        let db = sqlite_db(contact_details::Entity).await;
        let repo = ContactDetailsRepository::new(db.clone());

        let first = repo
            .upsert("+62 812".to_string(), "hello@example.com".to_string())
            .await
            .expect("first upsert");
        let second = repo
            .upsert("+62 813".to_string(), "hello@example.com".to_string())
            .await
            .expect("second upsert");

        assert_eq!(second.id, first.id);
        assert_eq!(second.phone_number, "+62 813");

        let rows = contact_details::Entity::find().all(&db).await.expect("list");
        assert_eq!(rows.len(), 1);
    }
}
