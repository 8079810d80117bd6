//! Response/request DTOs and the API-level error type.
//!
//! Response DTOs are the projection layer: pure functions from stored
//! entities (plus joined context) to the public or private view. The public
//! structs simply do not have the internal fields, so a redaction bug is a
//! type error.

mod artifacts;
mod catalog;
mod sites;

pub use artifacts::{
    ArtifactRequest, PrivateArtifactResponse, PublicArtifactResponse,
};
pub use catalog::{
    AddNoteRequest, CatalogNoteResponse, CatalogRecordResponse, CreateCatalogRecordRequest,
    NewNoteRequest,
};
pub use sites::{PrivateSiteResponse, PublicSiteResponse, SiteRequest};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error shape returned by every handler.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn not_found(message: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.to_string(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    pub fn conflict(message: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.to_string(),
        }
    }

    pub fn forbidden(message: &str) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: message.to_string(),
        }
    }

    pub fn internal(message: String) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
