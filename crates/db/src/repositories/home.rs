//! Home page text and links repositories (singletons, findOne-then-upsert).

use atelier_shared::AppResult;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

use super::db_err;
use crate::entities::{home_links, home_text};

/// Home hero text repository.
#[derive(Debug, Clone)]
pub struct HomeTextRepository {
    db: DatabaseConnection,
}

impl HomeTextRepository {
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetch the singleton instance, if one exists.
    pub async fn find_one(&self) -> AppResult<Option<home_text::Model>> {
        home_text::Entity::find().one(&self.db).await.map_err(db_err)
    }

    /// Create or mutate the singleton instance.
    pub async fn upsert(&self, text: String) -> AppResult<home_text::Model> {
        match self.find_one().await? {
            Some(model) => {
                let mut active = model.into_active_model();
                active.text = Set(text);
                active.update(&self.db).await.map_err(db_err)
            }
            None => {
                let active = home_text::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    text: Set(text),
                };
                active.insert(&self.db).await.map_err(db_err)
            }
        }
    }
}

/// Final field values for the home link set.
#[derive(Debug, Clone)]
pub struct HomeLinksData {
    /// Label for the general-purpose link.
    pub general_title: String,
    /// Target of the general-purpose link.
    pub general_url: String,
    /// Label for the Instagram link.
    pub insta_title: String,
    /// Target of the Instagram link.
    pub insta_url: String,
}

/// Home link set repository.
#[derive(Debug, Clone)]
pub struct HomeLinksRepository {
    db: DatabaseConnection,
}

impl HomeLinksRepository {
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetch the singleton instance, if one exists.
    pub async fn find_one(&self) -> AppResult<Option<home_links::Model>> {
        home_links::Entity::find()
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Create or mutate the singleton instance.
    pub async fn upsert(&self, data: HomeLinksData) -> AppResult<home_links::Model> {
        match self.find_one().await? {
            Some(model) => {
                let mut active = model.into_active_model();
                active.general_title = Set(data.general_title);
                active.general_url = Set(data.general_url);
                active.insta_title = Set(data.insta_title);
                active.insta_url = Set(data.insta_url);
                active.update(&self.db).await.map_err(db_err)
            }
            None => {
                let active = home_links::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    general_title: Set(data.general_title),
                    general_url: Set(data.general_url),
                    insta_title: Set(data.insta_title),
                    insta_url: Set(data.insta_url),
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
    async fn test_text_upsert_keeps_one_row() {
        let db = sqlite_db(home_text::Entity).await;
        let repo = HomeTextRepository::new(db.clone());

        let first = repo.upsert("Hello".to_string()).await.expect("first upsert");
        let second = repo.upsert("Hi there".to_string()).await.expect("second upsert");

        assert_eq!(second.id, first.id);
        assert_eq!(second.text, "Hi there");

        let rows = home_text::Entity::find().all(&db).await.expect("list");
        assert_eq!(rows.len(), 1);
    }
}
