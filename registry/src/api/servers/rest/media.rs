//! Media handlers: image upload and public image retrieval.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::api::dto::ApiError;
use crate::api::servers::app_state::AppState;
use crate::api::servers::jwt_middleware::AuthenticatedUser;
use crate::modules::access::Capability;
use crate::modules::media::{public_image_url, MediaService, MediaUpload, ServiceError};

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(e) => ApiError::internal(e.to_string()),
            ServiceError::ArtifactNotFound(id) => ApiError::not_found(&format!("Artifact {id}")),
            ServiceError::NotFound(id) => ApiError::not_found(&format!("Media file {id}")),
            ServiceError::InvalidInput(msg) => ApiError::bad_request(&msg),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadParams {
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFileResponse {
    pub id: i32,
    pub artifact_id: i32,
    pub file_name: String,
    pub content_type: String,
    pub is_primary: bool,
    pub url: String,
}

/// POST /api/private/artifacts/{id}/images
///
/// Multipart upload; the first field with a filename is taken as the file.
pub async fn upload(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(artifact_id): Path<i32>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MediaFileResponse>), ApiError> {
    if !user.capabilities.contains(Capability::UploadMedia) {
        return Err(ApiError::forbidden("Media upload requires CanUploadMedia"));
    }

    let mut upload: Option<MediaUpload> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(&format!("Invalid multipart body: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(&format!("Failed to read upload: {e}")))?;

        upload = Some(MediaUpload {
            file_name,
            content_type,
            data: data.to_vec(),
        });
        break;
    }

    let upload = upload.ok_or_else(|| ApiError::bad_request("No file field in upload"))?;

    let created = MediaService::new(&state.db)
        .upload(artifact_id, upload, params.is_primary)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MediaFileResponse {
            id: created.id,
            artifact_id: created.artifact_id,
            file_name: created.file_name,
            content_type: created.content_type,
            is_primary: created.is_primary,
            url: public_image_url(created.id),
        }),
    ))
}

/// GET /api/public/artifacts/images/{id}
///
/// Serves stored bytes with the recorded content type. Responses are
/// cacheable; image rows are immutable once stored.
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(HeaderMap, Vec<u8>), ApiError> {
    let (data, content_type) = MediaService::new(&state.db).get(id).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=86400"),
    );

    Ok((headers, data))
}
