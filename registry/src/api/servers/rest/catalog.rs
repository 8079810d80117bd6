//! Catalog workflow handlers.
//!
//! The capability gate lives in the service; handlers only hand over the
//! caller's capability set and identity.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::api::dto::{
    AddNoteRequest, ApiError, CatalogNoteResponse, CatalogRecordResponse,
    CreateCatalogRecordRequest,
};
use crate::api::servers::app_state::AppState;
use crate::api::servers::jwt_middleware::AuthenticatedUser;
use crate::modules::catalog::{CatalogService, NoteDraft, ServiceError};

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(e) => ApiError::internal(e.to_string()),
            ServiceError::NotFound(id) => ApiError::not_found(&format!("Catalog record {id}")),
            ServiceError::ArtifactNotFound(id) => ApiError::not_found(&format!("Artifact {id}")),
            ServiceError::UserNotFound(id) => ApiError::not_found(&format!("User {id}")),
            ServiceError::InvalidTransition { from, to } => {
                ApiError::conflict(&format!("Cannot transition from {from} to {to}"))
            }
            ServiceError::Forbidden(cap) => {
                ApiError::forbidden(&format!("Requires the {cap} capability"))
            }
            ServiceError::InvalidInput(msg) => ApiError::bad_request(&msg),
            ServiceError::CorruptStatus(_) => ApiError::internal(err.to_string()),
        }
    }
}

/// POST /api/private/catalog-records
pub async fn create(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateCatalogRecordRequest>,
) -> Result<(StatusCode, Json<CatalogRecordResponse>), ApiError> {
    let notes = payload
        .notes
        .into_iter()
        .map(|n| NoteDraft {
            author_id: user.user_id.clone(),
            content: n.content,
        })
        .collect();

    let (record, stored_notes) = CatalogService::new(&state.db, state.workflow)
        .create(payload.artifact_id, &user.user_id, notes)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CatalogRecordResponse::project(&record, &stored_notes)),
    ))
}

/// GET /api/private/catalog-records/{id}
pub async fn get(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<CatalogRecordResponse>, ApiError> {
    let (record, notes) = CatalogService::new(&state.db, state.workflow)
        .get(id)
        .await?;
    Ok(Json(CatalogRecordResponse::project(&record, &notes)))
}

/// POST /api/private/catalog-records/{id}/submit
pub async fn submit(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<CatalogRecordResponse>, ApiError> {
    let service = CatalogService::new(&state.db, state.workflow);
    let record = service.submit(id).await?;
    let (_, notes) = service.get(id).await?;
    Ok(Json(CatalogRecordResponse::project(&record, &notes)))
}

/// POST /api/private/catalog-records/{id}/verify
pub async fn verify(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<CatalogRecordResponse>, ApiError> {
    let service = CatalogService::new(&state.db, state.workflow);
    let record = service
        .verify(id, &user.user_id, &user.capabilities)
        .await?;
    let (_, notes) = service.get(id).await?;
    Ok(Json(CatalogRecordResponse::project(&record, &notes)))
}

/// POST /api/private/catalog-records/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<CatalogRecordResponse>, ApiError> {
    let service = CatalogService::new(&state.db, state.workflow);
    let record = service
        .reject(id, &user.user_id, &user.capabilities)
        .await?;
    let (_, notes) = service.get(id).await?;
    Ok(Json(CatalogRecordResponse::project(&record, &notes)))
}

/// POST /api/private/catalog-records/{id}/notes
pub async fn add_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<AddNoteRequest>,
) -> Result<(StatusCode, Json<CatalogNoteResponse>), ApiError> {
    let note = CatalogService::new(&state.db, state.workflow)
        .add_note(id, &user.user_id, payload.content)
        .await?;
    Ok((StatusCode::CREATED, Json(CatalogNoteResponse::project(&note))))
}
