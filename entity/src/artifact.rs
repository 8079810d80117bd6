use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "artifact")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub catalog_number: String,
    pub description: Option<String>,
    pub public_narrative: Option<String>,
    pub date_discovered: DateTimeWithTimeZone,
    pub artifact_type: String,
    pub site_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::site::Entity",
        from = "Column::SiteId",
        to = "super::site::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Site,
    #[sea_orm(has_many = "super::artifact_media_file::Entity")]
    MediaFile,
    #[sea_orm(has_many = "super::catalog_record::Entity")]
    CatalogRecord,
}

impl Related<super::site::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Site.def()
    }
}

impl Related<super::artifact_media_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MediaFile.def()
    }
}

impl Related<super::catalog_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CatalogRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
