use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Binary image attachment for an artifact. At most one row per artifact
/// carries `is_primary = true`; the flip is enforced transactionally in the
/// media service, not by a database constraint.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "artifact_media_file")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub artifact_id: i32,
    pub file_name: String,
    pub content_type: String,
    #[serde(skip_serializing)]
    pub data: Vec<u8>,
    pub is_primary: bool,
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
}

impl Related<super::artifact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artifact.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
