//! Site service layer for API business logic.
//!
//! This service encapsulates business logic for site operations,
//! keeping REST handlers thin and focused on HTTP concerns.

use entity::{artifact, artifact_media_file, catalog_note, catalog_record, site};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
    Set, TransactionTrait,
};
use tracing::info;

/// Errors that can occur in site service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Site not found: {0}")]
    NotFound(i32),
}

/// Field set for creating or replacing a site.
#[derive(Debug, Clone)]
pub struct SiteDraft {
    pub name: String,
    pub location: String,
    pub coordinates: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    pub public_narrative: Option<String>,
    pub aeon_narrative: Option<String>,
}

/// Service for site-related business logic.
pub struct SiteService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SiteService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all sites.
    pub async fn list_all(&self) -> Result<Vec<site::Model>, ServiceError> {
        Ok(site::Entity::find().all(self.db).await?)
    }

    /// Get a site by id.
    pub async fn get_by_id(&self, id: i32) -> Result<site::Model, ServiceError> {
        site::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Create a site.
    pub async fn create(&self, draft: SiteDraft) -> Result<site::Model, ServiceError> {
        let created = site::ActiveModel {
            name: Set(draft.name),
            location: Set(draft.location),
            coordinates: Set(draft.coordinates),
            latitude: Set(draft.latitude),
            longitude: Set(draft.longitude),
            description: Set(draft.description),
            public_narrative: Set(draft.public_narrative),
            aeon_narrative: Set(draft.aeon_narrative),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        info!(site_id = created.id, name = %created.name, "Site created");

        Ok(created)
    }

    /// Replace a site's fields.
    pub async fn update(&self, id: i32, draft: SiteDraft) -> Result<site::Model, ServiceError> {
        let existing = site::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        let mut active: site::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.location = Set(draft.location);
        active.coordinates = Set(draft.coordinates);
        active.latitude = Set(draft.latitude);
        active.longitude = Set(draft.longitude);
        active.description = Set(draft.description);
        active.public_narrative = Set(draft.public_narrative);
        active.aeon_narrative = Set(draft.aeon_narrative);

        let updated = active.update(self.db).await?;

        info!(site_id = id, "Site updated");

        Ok(updated)
    }

    /// Delete a site and everything hanging off it.
    ///
    /// Children are removed explicitly inside one transaction (notes, then
    /// records, then media, then artifacts, then the site), so the result
    /// does not depend on the driver enforcing `ON DELETE CASCADE`.
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;

        let existing = site::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        let artifact_ids: Vec<i32> = artifact::Entity::find()
            .select_only()
            .column(artifact::Column::Id)
            .filter(artifact::Column::SiteId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        if !artifact_ids.is_empty() {
            let record_ids: Vec<i32> = catalog_record::Entity::find()
                .select_only()
                .column(catalog_record::Column::Id)
                .filter(catalog_record::Column::ArtifactId.is_in(artifact_ids.clone()))
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
                .filter(catalog_record::Column::ArtifactId.is_in(artifact_ids.clone()))
                .exec(&txn)
                .await?;

            artifact_media_file::Entity::delete_many()
                .filter(artifact_media_file::Column::ArtifactId.is_in(artifact_ids))
                .exec(&txn)
                .await?;

            artifact::Entity::delete_many()
                .filter(artifact::Column::SiteId.eq(id))
                .exec(&txn)
                .await?;
        }

        site::Entity::delete_by_id(existing.id).exec(&txn).await?;

        txn.commit().await?;

        info!(site_id = id, "Site deleted");

        Ok(())
    }
}
