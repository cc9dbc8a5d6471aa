//! About page repository (singleton, findOne-then-upsert).

use atelier_core::attachment::MediaRef;
use atelier_shared::AppResult;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

use super::db_err;
use crate::entities::about;
use crate::media::ref_into_columns;

/// Final field values for the about page.
#[derive(Debug, Clone)]
pub struct AboutData {
    /// Subheading line.
    pub subheading: String,
    /// Body text.
    pub description: String,
    /// Highlighted text fragment.
    pub purple_text: String,
    /// Portrait image, if any.
    pub image: Option<MediaRef>,
    /// Resume PDF, if any.
    pub pdf: Option<MediaRef>,
}

/// About page repository.
#[derive(Debug, Clone)]
pub struct AboutRepository {
    db: DatabaseConnection,
}

impl AboutRepository {
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetch the singleton instance, if one exists.
    pub async fn find_one(&self) -> AppResult<Option<about::Model>> {
        about::Entity::find().one(&self.db).await.map_err(db_err)
    }

    /// Create or mutate the singleton instance.
    ///
    /// The caller is responsible for having already replaced or discarded
    /// the previous instance's media.
    pub async fn upsert(&self, data: AboutData) -> AppResult<about::Model> {
        let (image_url, image_key) = ref_into_columns(data.image);
        let (pdf_url, pdf_key) = ref_into_columns(data.pdf);

        match self.find_one().await? {
            Some(model) => {
                let mut active = model.into_active_model();
                active.subheading = Set(data.subheading);
                active.description = Set(data.description);
                active.purple_text = Set(data.purple_text);
                active.image_url = Set(image_url);
                active.image_key = Set(image_key);
                active.pdf_url = Set(pdf_url);
                active.pdf_key = Set(pdf_key);
                active.updated_at = Set(Utc::now().into());
                active.update(&self.db).await.map_err(db_err)
            }
            None => {
                let active = about::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    subheading: Set(data.subheading),
                    description: Set(data.description),
                    purple_text: Set(data.purple_text),
                    image_url: Set(image_url),
                    image_key: Set(image_key),
                    pdf_url: Set(pdf_url),
                    pdf_key: Set(pdf_key),
                    updated_at: Set(Utc::now().into()),
                };
                active.insert(&self.db).await.map_err(db_err)
            }
        }
    }

    /// Remove the singleton instance. Returns false if none existed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = about::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::sqlite_db;

    fn sample(subheading: &str) -> AboutData {
        AboutData {
            subheading: subheading.to_string(),
            description: "Body text".to_string(),
            purple_text: "highlight".to_string(),
            image: Some(MediaRef::new(
                "https://cdn.example.com/Aboutpage/images/1_me.png",
                "Aboutpage/images/1_me.png",
            )),
            pdf: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_inserts_on_empty_table() {
        let repo = AboutRepository::new(sqlite_db(about::Entity).await);

        let model = repo.upsert(sample("First")).await.expect("first upsert");
        assert_eq!(model.subheading, "First");
        assert_eq!(
            model.image_key.as_deref(),
            Some("Aboutpage/images/1_me.png")
        );
        assert!(model.pdf_url.is_none());
    }

    #[tokio::test]
    async fn test_upsert_mutates_the_single_row_in_place() {
        let db = sqlite_db(about::Entity).await;
        let repo = AboutRepository::new(db.clone());

        let first = repo.upsert(sample("First")).await.expect("first upsert");
        let second = repo.upsert(sample("Second")).await.expect("second upsert");

        assert_eq!(second.id, first.id);
        assert_eq!(second.subheading, "Second");

        let rows = about::Entity::find().all(&db).await.expect("list");
        assert_eq!(rows.len(), 1);
    }
}
