use chrono::{DateTime, Utc};
use entity::{catalog_note, catalog_record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogNoteResponse {
    pub id: i32,
    pub author_id: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl CatalogNoteResponse {
    pub fn project(note: &catalog_note::Model) -> Self {
        Self {
            id: note.id,
            author_id: note.author_id.clone(),
            content: note.content.clone(),
            created: note.created.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecordResponse {
    pub id: i32,
    pub artifact_id: i32,
    pub submitted_by_id: String,
    pub verified_by_id: Option<String>,
    pub status: String,
    pub date_submitted: DateTime<Utc>,
    pub date_verified: Option<DateTime<Utc>>,
    pub notes: Vec<CatalogNoteResponse>,
}

impl CatalogRecordResponse {
    pub fn project(record: &catalog_record::Model, notes: &[catalog_note::Model]) -> Self {
        Self {
            id: record.id,
            artifact_id: record.artifact_id,
            submitted_by_id: record.submitted_by_id.clone(),
            verified_by_id: record.verified_by_id.clone(),
            status: record.status.clone(),
            date_submitted: record.date_submitted.into(),
            date_verified: record.date_verified.map(Into::into),
            notes: notes.iter().map(CatalogNoteResponse::project).collect(),
        }
    }
}

/// Create payload: the record starts in Draft for the calling submitter;
/// initial notes are authored by the caller too.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCatalogRecordRequest {
    pub artifact_id: i32,
    #[serde(default)]
    pub notes: Vec<NewNoteRequest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNoteRequest {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNoteRequest {
    pub content: String,
}
