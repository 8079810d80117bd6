//! Artifact media (image) storage module.

mod service;

pub use service::{MediaService, MediaUpload, ServiceError};

/// Public URL under which a media file's bytes are served.
pub fn public_image_url(media_id: i32) -> String {
    format!("/api/public/artifacts/images/{media_id}")
}
