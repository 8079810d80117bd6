//! Media service: uploads and byte retrieval for artifact images.
//!
//! The single invariant here is "at most one primary file per artifact".
//! Uploads that claim primary unset every other primary row and insert the
//! new one inside one transaction, so two concurrent primary uploads cannot
//! both stay primary.

use entity::{artifact, artifact_media_file};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
    Set, TransactionTrait,
};
use tracing::info;

/// Errors that can occur in media service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Artifact not found: {0}")]
    ArtifactNotFound(i32),

    #[error("Media file not found: {0}")]
    NotFound(i32),

    #[error("Invalid upload: {0}")]
    InvalidInput(String),
}

/// An uploaded file, prior to storage.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Service for artifact media storage.
pub struct MediaService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MediaService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Store an uploaded file under an artifact.
    ///
    /// The content type is recorded verbatim; bytes are not inspected, the
    /// caller gets back exactly what they uploaded. Empty payloads are
    /// rejected up front since retrieval treats them as absent.
    pub async fn upload(
        &self,
        artifact_id: i32,
        upload: MediaUpload,
        is_primary: bool,
    ) -> Result<artifact_media_file::Model, ServiceError> {
        if upload.data.is_empty() {
            return Err(ServiceError::InvalidInput("file is empty".to_string()));
        }

        let txn = self.db.begin().await?;

        // Concurrent flips for the same artifact queue behind this row lock;
        // without it, two uploads under READ COMMITTED can each miss the
        // other's uncommitted primary and both keep the flag.
        artifact::Entity::find_by_id(artifact_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ServiceError::ArtifactNotFound(artifact_id))?;

        if is_primary {
            artifact_media_file::Entity::update_many()
                .col_expr(artifact_media_file::Column::IsPrimary, Expr::value(false))
                .filter(artifact_media_file::Column::ArtifactId.eq(artifact_id))
                .filter(artifact_media_file::Column::IsPrimary.eq(true))
                .exec(&txn)
                .await?;
        }

        let created = artifact_media_file::ActiveModel {
            artifact_id: Set(artifact_id),
            file_name: Set(upload.file_name),
            content_type: Set(upload.content_type),
            data: Set(upload.data),
            is_primary: Set(is_primary),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            media_id = created.id,
            artifact_id,
            is_primary,
            file_name = %created.file_name,
            "Media file stored"
        );

        Ok(created)
    }

    /// Fetch stored bytes and content type for a media id.
    ///
    /// A row with an empty payload is treated as absent, matching the
    /// upload-side validation.
    pub async fn get(&self, media_id: i32) -> Result<(Vec<u8>, String), ServiceError> {
        let media = artifact_media_file::Entity::find_by_id(media_id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound(media_id))?;

        if media.data.is_empty() {
            return Err(ServiceError::NotFound(media_id));
        }

        Ok((media.data, media.content_type))
    }

    /// Resolve the primary media id for an artifact, if one exists.
    pub async fn primary_for_artifact(
        &self,
        artifact_id: i32,
    ) -> Result<Option<i32>, ServiceError> {
        Ok(artifact_media_file::Entity::find()
            .filter(artifact_media_file::Column::ArtifactId.eq(artifact_id))
            .filter(artifact_media_file::Column::IsPrimary.eq(true))
            .one(self.db)
            .await?
            .map(|m| m.id))
    }
}
