//! Catalog record workflow module.
//!
//! A catalog record wraps one artifact's submission/verification lifecycle:
//! Draft → Submitted → Verified or Rejected, with a note trail.

mod service;
mod status;

pub use service::{CatalogService, NoteDraft, ServiceError, MAX_NOTE_LEN};
pub use status::{CatalogStatus, UnknownCatalogStatus};
