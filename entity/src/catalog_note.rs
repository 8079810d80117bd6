use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_note")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub catalog_record_id: i32,
    pub author_id: String,
    pub content: String,
    pub created: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::catalog_record::Entity",
        from = "Column::CatalogRecordId",
        to = "super::catalog_record::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    CatalogRecord,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Author,
}

impl Related<super::catalog_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CatalogRecord.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
