//! Artifact service layer for API business logic.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use entity::{artifact, artifact_media_file, catalog_note, catalog_record, site};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use super::types::{ArtifactType, UnknownArtifactType};

/// Errors that can occur in artifact service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Artifact not found: {0}")]
    NotFound(i32),

    #[error("Site not found: {0}")]
    SiteNotFound(i32),

    #[error(transparent)]
    InvalidType(#[from] UnknownArtifactType),
}

/// Field set for creating or replacing an artifact.
#[derive(Debug, Clone)]
pub struct ArtifactDraft {
    pub name: String,
    pub catalog_number: String,
    pub description: Option<String>,
    pub public_narrative: Option<String>,
    pub date_discovered: DateTime<Utc>,
    pub artifact_type: String,
    pub site_id: i32,
}

/// An artifact with the joined context projections need: the owning site's
/// name and the id of the primary media file, if any.
#[derive(Debug, Clone)]
pub struct ArtifactView {
    pub artifact: artifact::Model,
    pub site_name: String,
    pub primary_image_id: Option<i32>,
}

/// Service for artifact-related business logic.
pub struct ArtifactService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ArtifactService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all artifacts with site name and primary image resolved.
    pub async fn list_all(&self) -> Result<Vec<ArtifactView>, ServiceError> {
        let rows = artifact::Entity::find()
            .find_also_related(site::Entity)
            .all(self.db)
            .await?;

        self.assemble_views(rows).await
    }

    /// List the artifacts of one site. Fails `SiteNotFound` when the site id
    /// does not exist, rather than returning an empty success.
    pub async fn list_by_site(&self, site_id: i32) -> Result<Vec<ArtifactView>, ServiceError> {
        let site = site::Entity::find_by_id(site_id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::SiteNotFound(site_id))?;

        let rows = artifact::Entity::find()
            .filter(artifact::Column::SiteId.eq(site.id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|a| (a, Some(site.clone())))
            .collect();

        self.assemble_views(rows).await
    }

    /// Get one artifact by id.
    pub async fn get_by_id(&self, id: i32) -> Result<ArtifactView, ServiceError> {
        let (artifact, site) = artifact::Entity::find_by_id(id)
            .find_also_related(site::Entity)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        let mut views = self.assemble_views(vec![(artifact, site)]).await?;
        Ok(views.remove(0))
    }

    /// Full catalog history for one artifact: each record with its notes in
    /// creation order. Private-projection data.
    pub async fn catalog_history(
        &self,
        artifact_id: i32,
    ) -> Result<Vec<(catalog_record::Model, Vec<catalog_note::Model>)>, ServiceError> {
        Ok(catalog_record::Entity::find()
            .filter(catalog_record::Column::ArtifactId.eq(artifact_id))
            .find_with_related(catalog_note::Entity)
            .order_by_asc(catalog_record::Column::Id)
            .order_by_asc(catalog_note::Column::Created)
            .all(self.db)
            .await?)
    }

    /// Create an artifact under an existing site.
    pub async fn create(&self, draft: ArtifactDraft) -> Result<ArtifactView, ServiceError> {
        let site = site::Entity::find_by_id(draft.site_id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::SiteNotFound(draft.site_id))?;

        let artifact_type = ArtifactType::parse(&draft.artifact_type)?;

        let created = artifact::ActiveModel {
            name: Set(draft.name),
            catalog_number: Set(draft.catalog_number),
            description: Set(draft.description),
            public_narrative: Set(draft.public_narrative),
            date_discovered: Set(draft.date_discovered.into()),
            artifact_type: Set(artifact_type.as_str().to_string()),
            site_id: Set(site.id),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        info!(
            artifact_id = created.id,
            catalog_number = %created.catalog_number,
            "Artifact created"
        );

        Ok(ArtifactView {
            artifact: created,
            site_name: site.name,
            primary_image_id: None,
        })
    }

    /// Replace an artifact's fields.
    pub async fn update(&self, id: i32, draft: ArtifactDraft) -> Result<(), ServiceError> {
        let site = site::Entity::find_by_id(draft.site_id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::SiteNotFound(draft.site_id))?;

        let existing = artifact::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        let artifact_type = ArtifactType::parse(&draft.artifact_type)?;

        let mut active: artifact::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.catalog_number = Set(draft.catalog_number);
        active.description = Set(draft.description);
        active.public_narrative = Set(draft.public_narrative);
        active.date_discovered = Set(draft.date_discovered.into());
        active.artifact_type = Set(artifact_type.as_str().to_string());
        active.site_id = Set(site.id);

        active.update(self.db).await?;

        info!(artifact_id = id, "Artifact updated");

        Ok(())
    }

    /// Delete an artifact together with its media files, catalog records and
    /// notes, in one transaction.
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;

        let existing = artifact::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        let record_ids: Vec<i32> = catalog_record::Entity::find()
            .select_only()
            .column(catalog_record::Column::Id)
            .filter(catalog_record::Column::ArtifactId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        if !record_ids.is_empty() {
            catalog_note::Entity::delete_many()
                .filter(catalog_note::Column::CatalogRecordId.is_in(record_ids))
                .exec(&txn)
                .await?;
        }

        catalog_record::Entity::delete_many()
            .filter(catalog_record::Column::ArtifactId.eq(id))
            .exec(&txn)
            .await?;

        artifact_media_file::Entity::delete_many()
            .filter(artifact_media_file::Column::ArtifactId.eq(id))
            .exec(&txn)
            .await?;

        artifact::Entity::delete_by_id(existing.id).exec(&txn).await?;

        txn.commit().await?;

        info!(artifact_id = id, "Artifact deleted");

        Ok(())
    }

    /// Attach site name and primary image id to raw artifact rows.
    async fn assemble_views(
        &self,
        rows: Vec<(artifact::Model, Option<site::Model>)>,
    ) -> Result<Vec<ArtifactView>, ServiceError> {
        let ids: Vec<i32> = rows.iter().map(|(a, _)| a.id).collect();

        let mut primary_by_artifact: HashMap<i32, i32> = HashMap::new();
        if !ids.is_empty() {
            let primaries: Vec<(i32, i32)> = artifact_media_file::Entity::find()
                .select_only()
                .column(artifact_media_file::Column::Id)
                .column(artifact_media_file::Column::ArtifactId)
                .filter(artifact_media_file::Column::ArtifactId.is_in(ids))
                .filter(artifact_media_file::Column::IsPrimary.eq(true))
                .into_tuple()
                .all(self.db)
                .await?;

            for (media_id, artifact_id) in primaries {
                primary_by_artifact.entry(artifact_id).or_insert(media_id);
            }
        }

        Ok(rows
            .into_iter()
            .map(|(artifact, site)| {
                let primary_image_id = primary_by_artifact.get(&artifact.id).copied();
                ArtifactView {
                    site_name: site.map(|s| s.name).unwrap_or_default(),
                    primary_image_id,
                    artifact,
                }
            })
            .collect())
    }
}
