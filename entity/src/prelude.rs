pub use super::artifact::Entity as Artifact;
pub use super::artifact_media_file::Entity as ArtifactMediaFile;
pub use super::catalog_note::Entity as CatalogNote;
pub use super::catalog_record::Entity as CatalogRecord;
pub use super::site::Entity as Site;
pub use super::user::Entity as User;
