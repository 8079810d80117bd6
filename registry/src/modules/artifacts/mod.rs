//! Artifact storage and management module.

mod service;
mod types;

pub use service::{ArtifactDraft, ArtifactService, ArtifactView, ServiceError};
pub use types::{ArtifactType, UnknownArtifactType};
