//! Site handlers.
//!
//! These handlers follow the thin controller pattern:
//! - Extract request parameters
//! - Delegate to SiteService
//! - Project to the caller's tier and convert to HTTP response

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::api::dto::{ApiError, PrivateSiteResponse, PublicSiteResponse, SiteRequest};
use crate::api::servers::app_state::AppState;
use crate::api::servers::jwt_middleware::AuthenticatedUser;
use crate::modules::sites::{ServiceError, SiteService};

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(e) => ApiError::internal(e.to_string()),
            ServiceError::NotFound(id) => ApiError::not_found(&format!("Site {id}")),
        }
    }
}

/// GET /api/public/sites
pub async fn list_public(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicSiteResponse>>, ApiError> {
    let sites = SiteService::new(&state.db).list_all().await?;
    Ok(Json(sites.iter().map(PublicSiteResponse::project).collect()))
}

/// GET /api/public/sites/{id}
pub async fn get_public(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PublicSiteResponse>, ApiError> {
    let site = SiteService::new(&state.db).get_by_id(id).await?;
    Ok(Json(PublicSiteResponse::project(&site)))
}

/// GET /api/private/sites
pub async fn list_private(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<PrivateSiteResponse>>, ApiError> {
    let sites = SiteService::new(&state.db).list_all().await?;
    Ok(Json(sites.iter().map(PrivateSiteResponse::project).collect()))
}

/// GET /api/private/sites/{id}
pub async fn get_private(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<PrivateSiteResponse>, ApiError> {
    let site = SiteService::new(&state.db).get_by_id(id).await?;
    Ok(Json(PrivateSiteResponse::project(&site)))
}

/// POST /api/private/sites
pub async fn create(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<SiteRequest>,
) -> Result<(StatusCode, Json<PrivateSiteResponse>), ApiError> {
    let site = SiteService::new(&state.db)
        .create(payload.into_draft())
        .await?;
    Ok((StatusCode::CREATED, Json(PrivateSiteResponse::project(&site))))
}

/// PUT /api/private/sites/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<SiteRequest>,
) -> Result<StatusCode, ApiError> {
    SiteService::new(&state.db)
        .update(id, payload.into_draft())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/private/sites/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    SiteService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
