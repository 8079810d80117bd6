use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Approval-workflow envelope around one artifact submission.
///
/// `status` holds the string form of `CatalogStatus`; the transition rules
/// live in the catalog service. User references are restrict-on-delete so a
/// user cannot disappear while records point at them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_record")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub artifact_id: i32,
    pub submitted_by_id: String,
    pub verified_by_id: Option<String>,
    pub status: String,
    pub date_submitted: DateTimeWithTimeZone,
    pub date_verified: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::artifact::Entity",
        from = "Column::ArtifactId",
        to = "super::artifact::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Artifact,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SubmittedById",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    SubmittedBy,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::VerifiedById",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    VerifiedBy,
    #[sea_orm(has_many = "super::catalog_note::Entity")]
    Note,
}

impl Related<super::artifact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artifact.def()
    }
}

impl Related<super::catalog_note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Note.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
