//! `SeaORM` Entity for content posts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::media::MediaRefList;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub main_image_url: Option<String>,
    pub main_image_key: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub images: MediaRefList,
    #[sea_orm(column_type = "JsonBinary")]
    pub videos: MediaRefList,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
