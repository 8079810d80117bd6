//! Site storage and management module.

mod service;

pub use service::{ServiceError, SiteDraft, SiteService};
