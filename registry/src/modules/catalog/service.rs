//! Catalog workflow service: record lifecycle and note history.
//!
//! Capability checks live here, against the capability set the caller hands
//! in, so verify/reject are gated regardless of which surface invoked them.

use chrono::Utc;
use entity::{artifact, catalog_note, catalog_record, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use crate::bootstrap::config::WorkflowConfig;
use crate::modules::access::{Capability, CapabilitySet};

use super::status::CatalogStatus;

/// Upper bound on note content length in characters, matching the stored
/// column contract.
pub const MAX_NOTE_LEN: usize = 2000;

/// Errors that can occur in catalog service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Catalog record not found: {0}")]
    NotFound(i32),

    #[error("Artifact not found: {0}")]
    ArtifactNotFound(i32),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: CatalogStatus,
        to: CatalogStatus,
    },

    #[error("Caller lacks the {0} capability")]
    Forbidden(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Stored status is corrupt: {0:?}")]
    CorruptStatus(String),
}

/// A note to attach to a record.
#[derive(Debug, Clone)]
pub struct NoteDraft {
    pub author_id: String,
    pub content: String,
}

/// Service for catalog record workflow logic.
pub struct CatalogService<'a> {
    db: &'a DatabaseConnection,
    policy: WorkflowConfig,
}

impl<'a> CatalogService<'a> {
    pub fn new(db: &'a DatabaseConnection, policy: WorkflowConfig) -> Self {
        Self { db, policy }
    }

    /// Create a record in Draft for an existing artifact, optionally with
    /// initial notes. The record and its notes land in one transaction: the
    /// record is never visible without them.
    pub async fn create(
        &self,
        artifact_id: i32,
        submitted_by_id: &str,
        notes: Vec<NoteDraft>,
    ) -> Result<(catalog_record::Model, Vec<catalog_note::Model>), ServiceError> {
        for note in &notes {
            validate_note_content(&note.content)?;
        }

        let txn = self.db.begin().await?;

        artifact::Entity::find_by_id(artifact_id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::ArtifactNotFound(artifact_id))?;

        require_user(&txn, submitted_by_id).await?;

        let record = catalog_record::ActiveModel {
            artifact_id: Set(artifact_id),
            submitted_by_id: Set(submitted_by_id.to_string()),
            verified_by_id: Set(None),
            status: Set(CatalogStatus::Draft.as_str().to_string()),
            date_submitted: Set(Utc::now().into()),
            date_verified: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut stored_notes = Vec::with_capacity(notes.len());
        for note in notes {
            require_user(&txn, &note.author_id).await?;

            let stored = catalog_note::ActiveModel {
                catalog_record_id: Set(record.id),
                author_id: Set(note.author_id),
                content: Set(note.content),
                created: Set(Utc::now().into()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            stored_notes.push(stored);
        }

        txn.commit().await?;

        info!(
            record_id = record.id,
            artifact_id,
            submitted_by = %submitted_by_id,
            "Catalog record created"
        );

        Ok((record, stored_notes))
    }

    /// Get a record with its notes in creation order.
    pub async fn get(
        &self,
        record_id: i32,
    ) -> Result<(catalog_record::Model, Vec<catalog_note::Model>), ServiceError> {
        let record = catalog_record::Entity::find_by_id(record_id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound(record_id))?;

        let notes = catalog_note::Entity::find()
            .filter(catalog_note::Column::CatalogRecordId.eq(record_id))
            .order_by_asc(catalog_note::Column::Created)
            .order_by_asc(catalog_note::Column::Id)
            .all(self.db)
            .await?;

        Ok((record, notes))
    }

    /// Draft → Submitted (or Rejected → Submitted when resubmission is
    /// enabled). Refreshes the submission timestamp.
    pub async fn submit(&self, record_id: i32) -> Result<catalog_record::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let record = self
            .locked_transition(&txn, record_id, CatalogStatus::Submitted)
            .await?;

        let mut active: catalog_record::ActiveModel = record.into();
        active.status = Set(CatalogStatus::Submitted.as_str().to_string());
        active.date_submitted = Set(Utc::now().into());
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        info!(record_id, "Catalog record submitted");

        Ok(updated)
    }

    /// Submitted → Verified. Requires the verification capability; the
    /// caller is recorded as the verifying party.
    pub async fn verify(
        &self,
        record_id: i32,
        caller_id: &str,
        caps: &CapabilitySet,
    ) -> Result<catalog_record::Model, ServiceError> {
        self.review(record_id, caller_id, caps, CatalogStatus::Verified)
            .await
    }

    /// Submitted → Rejected. Same capability gate as verify; the rejecting
    /// party is still recorded in `verified_by_id`.
    pub async fn reject(
        &self,
        record_id: i32,
        caller_id: &str,
        caps: &CapabilitySet,
    ) -> Result<catalog_record::Model, ServiceError> {
        self.review(record_id, caller_id, caps, CatalogStatus::Rejected)
            .await
    }

    /// Append a note. Allowed in every state; never changes status.
    pub async fn add_note(
        &self,
        record_id: i32,
        author_id: &str,
        content: String,
    ) -> Result<catalog_note::Model, ServiceError> {
        validate_note_content(&content)?;

        catalog_record::Entity::find_by_id(record_id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound(record_id))?;

        require_user(self.db, author_id).await?;

        let stored = catalog_note::ActiveModel {
            catalog_record_id: Set(record_id),
            author_id: Set(author_id.to_string()),
            content: Set(content),
            created: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        info!(record_id, author = %author_id, "Catalog note added");

        Ok(stored)
    }

    async fn review(
        &self,
        record_id: i32,
        caller_id: &str,
        caps: &CapabilitySet,
        outcome: CatalogStatus,
    ) -> Result<catalog_record::Model, ServiceError> {
        if !caps.contains(Capability::VerifyCatalogRecords) {
            return Err(ServiceError::Forbidden(
                Capability::VerifyCatalogRecords.as_str(),
            ));
        }

        let txn = self.db.begin().await?;

        require_user(&txn, caller_id).await?;

        let record = self.locked_transition(&txn, record_id, outcome).await?;

        let mut active: catalog_record::ActiveModel = record.into();
        active.status = Set(outcome.as_str().to_string());
        active.verified_by_id = Set(Some(caller_id.to_string()));
        active.date_verified = Set(Some(Utc::now().into()));
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        info!(record_id, outcome = %outcome, reviewed_by = %caller_id, "Catalog record reviewed");

        Ok(updated)
    }

    /// Load a record under an exclusive row lock and check the transition
    /// is legal from its current state. The lock makes concurrent reviews
    /// of the same record queue, so at most one sees a reviewable state.
    /// Illegal transitions fail loudly.
    async fn locked_transition<C: ConnectionTrait>(
        &self,
        conn: &C,
        record_id: i32,
        next: CatalogStatus,
    ) -> Result<catalog_record::Model, ServiceError> {
        let record = catalog_record::Entity::find_by_id(record_id)
            .lock_exclusive()
            .one(conn)
            .await?
            .ok_or(ServiceError::NotFound(record_id))?;

        let current = CatalogStatus::parse(&record.status)
            .map_err(|e| ServiceError::CorruptStatus(e.0))?;

        if !current.can_transition_to(next, self.policy.allow_resubmission) {
            return Err(ServiceError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        Ok(record)
    }
}

async fn require_user<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<(), ServiceError> {
    user::Entity::find_by_id(user_id)
        .one(conn)
        .await?
        .map(|_| ())
        .ok_or_else(|| ServiceError::UserNotFound(user_id.to_string()))
}

fn validate_note_content(content: &str) -> Result<(), ServiceError> {
    if content.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "note content is empty".to_string(),
        ));
    }
    if content.chars().count() > MAX_NOTE_LEN {
        return Err(ServiceError::InvalidInput(format!(
            "note content exceeds {MAX_NOTE_LEN} characters"
        )));
    }
    Ok(())
}
