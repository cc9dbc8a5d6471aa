//! Repository abstractions for data access.
//!
//! One repository per content type. Repositories persist final field
//! values only; media upload/delete orchestration happens above them in
//! the attachment manager.

mod about;
mod competence;
mod contact;
mod content;
mod education;
mod environment;
mod gallery;
mod home;
mod inquiry;
mod script;
mod skill;
mod strength;

pub use about::{AboutData, AboutRepository};
pub use competence::{CompetenceData, CompetenceRepository};
pub use contact::{ContactData, ContactDetailsRepository, ContactRepository};
pub use content::{ContentData, ContentRepository};
pub use education::{EducationData, EducationRepository, ExperienceData, ExperienceRepository};
pub use environment::{EnvironmentData, EnvironmentRepository};
pub use gallery::GalleryRepository;
pub use home::{HomeLinksData, HomeLinksRepository, HomeTextRepository};
pub use inquiry::{InquiryData, InquiryRepository};
pub use script::{ScriptData, ScriptRepository};
pub use skill::{SkillData, SkillRepository};
pub use strength::{StrengthData, StrengthRepository};

use atelier_shared::AppError;
use sea_orm::DbErr;

/// Map a database error into the application taxonomy.
pub(crate) fn db_err(e: DbErr) -> AppError {
    AppError::Database(e.to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::{
        ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, EntityTrait,
        Schema,
    };

    /// In-memory SQLite connection with the given entity's table created.
    ///
    /// The pool is pinned to one connection; an in-memory database lives
    /// and dies with the connection that opened it.
    pub(crate) async fn sqlite_db<E: EntityTrait>(entity: E) -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1);
        let db = Database::connect(options).await.expect("connect");
        let schema = Schema::new(DbBackend::Sqlite);
        let stmt = schema.create_table_from_entity(entity);
        db.execute(db.get_database_backend().build(&stmt))
            .await
            .expect("create table");
        db
    }
}
