//! Startup data seeding from JSON files and a seed image directory.

mod service;

pub use service::{
    ArtifactImport, CatalogNoteImport, CatalogRecordImport, ImportSummary, SeedService,
    ServiceError, SiteImport,
};
