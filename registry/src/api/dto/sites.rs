use entity::site;
use serde::{Deserialize, Serialize};

use crate::modules::sites::SiteDraft;

/// Site view for anonymous and low-privilege callers. Has no internal
/// narrative field at all.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSiteResponse {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub coordinates: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    pub public_narrative: Option<String>,
}

impl PublicSiteResponse {
    pub fn project(site: &site::Model) -> Self {
        Self {
            id: site.id,
            name: site.name.clone(),
            location: site.location.clone(),
            coordinates: site.coordinates.clone(),
            latitude: site.latitude,
            longitude: site.longitude,
            description: site.description.clone(),
            public_narrative: site.public_narrative.clone(),
        }
    }
}

/// Full site view for authorized callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateSiteResponse {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub coordinates: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    pub public_narrative: Option<String>,
    pub aeon_narrative: Option<String>,
}

impl PrivateSiteResponse {
    pub fn project(site: &site::Model) -> Self {
        Self {
            id: site.id,
            name: site.name.clone(),
            location: site.location.clone(),
            coordinates: site.coordinates.clone(),
            latitude: site.latitude,
            longitude: site.longitude,
            description: site.description.clone(),
            public_narrative: site.public_narrative.clone(),
            aeon_narrative: site.aeon_narrative.clone(),
        }
    }
}

/// Create/replace payload for a site.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRequest {
    pub name: String,
    pub location: String,
    pub coordinates: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    pub public_narrative: Option<String>,
    pub aeon_narrative: Option<String>,
}

impl SiteRequest {
    pub fn into_draft(self) -> SiteDraft {
        SiteDraft {
            name: self.name,
            location: self.location,
            coordinates: self.coordinates,
            latitude: self.latitude,
            longitude: self.longitude,
            description: self.description,
            public_narrative: self.public_narrative,
            aeon_narrative: self.aeon_narrative,
        }
    }
}
