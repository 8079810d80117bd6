//! Artifact handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::api::dto::{ApiError, ArtifactRequest, PrivateArtifactResponse, PublicArtifactResponse};
use crate::api::servers::app_state::AppState;
use crate::api::servers::jwt_middleware::AuthenticatedUser;
use crate::modules::artifacts::{ArtifactService, ServiceError};

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(e) => ApiError::internal(e.to_string()),
            ServiceError::NotFound(id) => ApiError::not_found(&format!("Artifact {id}")),
            ServiceError::SiteNotFound(id) => ApiError::not_found(&format!("Site {id}")),
            ServiceError::InvalidType(e) => ApiError::bad_request(&e.to_string()),
        }
    }
}

/// GET /api/public/artifacts
pub async fn list_public(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicArtifactResponse>>, ApiError> {
    let views = ArtifactService::new(&state.db).list_all().await?;
    Ok(Json(views.iter().map(PublicArtifactResponse::project).collect()))
}

/// GET /api/public/artifacts/{id}
pub async fn get_public(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PublicArtifactResponse>, ApiError> {
    let view = ArtifactService::new(&state.db).get_by_id(id).await?;
    Ok(Json(PublicArtifactResponse::project(&view)))
}

/// GET /api/public/sites/{id}/artifacts
pub async fn list_public_by_site(
    State(state): State<AppState>,
    Path(site_id): Path<i32>,
) -> Result<Json<Vec<PublicArtifactResponse>>, ApiError> {
    let views = ArtifactService::new(&state.db).list_by_site(site_id).await?;
    Ok(Json(views.iter().map(PublicArtifactResponse::project).collect()))
}

/// GET /api/private/artifacts
pub async fn list_private(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<PrivateArtifactResponse>>, ApiError> {
    let service = ArtifactService::new(&state.db);
    let views = service.list_all().await?;

    let mut responses = Vec::with_capacity(views.len());
    for view in &views {
        let history = service.catalog_history(view.artifact.id).await?;
        responses.push(PrivateArtifactResponse::project(view, &history));
    }
    Ok(Json(responses))
}

/// GET /api/private/artifacts/{id}
pub async fn get_private(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<PrivateArtifactResponse>, ApiError> {
    let service = ArtifactService::new(&state.db);
    let view = service.get_by_id(id).await?;
    let history = service.catalog_history(id).await?;
    Ok(Json(PrivateArtifactResponse::project(&view, &history)))
}

/// GET /api/private/sites/{id}/artifacts
pub async fn list_private_by_site(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(site_id): Path<i32>,
) -> Result<Json<Vec<PrivateArtifactResponse>>, ApiError> {
    let service = ArtifactService::new(&state.db);
    let views = service.list_by_site(site_id).await?;

    let mut responses = Vec::with_capacity(views.len());
    for view in &views {
        let history = service.catalog_history(view.artifact.id).await?;
        responses.push(PrivateArtifactResponse::project(view, &history));
    }
    Ok(Json(responses))
}

/// POST /api/private/artifacts
pub async fn create(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<ArtifactRequest>,
) -> Result<(StatusCode, Json<PrivateArtifactResponse>), ApiError> {
    let view = ArtifactService::new(&state.db)
        .create(payload.into_draft())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(PrivateArtifactResponse::project(&view, &[])),
    ))
}

/// PUT /api/private/artifacts/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<ArtifactRequest>,
) -> Result<StatusCode, ApiError> {
    ArtifactService::new(&state.db)
        .update(id, payload.into_draft())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/private/artifacts/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    ArtifactService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
