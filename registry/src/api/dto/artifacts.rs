use chrono::{DateTime, Utc};
use entity::{catalog_note, catalog_record};
use serde::{Deserialize, Serialize};

use crate::modules::artifacts::{ArtifactDraft, ArtifactView};
use crate::modules::media::public_image_url;

use super::catalog::CatalogRecordResponse;

/// Artifact view for anonymous callers: no internal description, no catalog
/// history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicArtifactResponse {
    pub id: i32,
    pub name: String,
    pub catalog_number: String,
    pub public_narrative: Option<String>,
    pub date_discovered: DateTime<Utc>,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub site_id: i32,
    pub site_name: String,
    pub primary_image_url: Option<String>,
}

impl PublicArtifactResponse {
    pub fn project(view: &ArtifactView) -> Self {
        Self {
            id: view.artifact.id,
            name: view.artifact.name.clone(),
            catalog_number: view.artifact.catalog_number.clone(),
            public_narrative: view.artifact.public_narrative.clone(),
            date_discovered: view.artifact.date_discovered.into(),
            artifact_type: view.artifact.artifact_type.clone(),
            site_id: view.artifact.site_id,
            site_name: view.site_name.clone(),
            primary_image_url: view.primary_image_id.map(public_image_url),
        }
    }
}

/// Full artifact view for authorized callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateArtifactResponse {
    pub id: i32,
    pub name: String,
    pub catalog_number: String,
    pub description: Option<String>,
    pub public_narrative: Option<String>,
    pub date_discovered: DateTime<Utc>,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub site_id: i32,
    pub site_name: String,
    pub primary_image_url: Option<String>,
    pub catalog_records: Vec<CatalogRecordResponse>,
}

impl PrivateArtifactResponse {
    pub fn project(
        view: &ArtifactView,
        history: &[(catalog_record::Model, Vec<catalog_note::Model>)],
    ) -> Self {
        Self {
            id: view.artifact.id,
            name: view.artifact.name.clone(),
            catalog_number: view.artifact.catalog_number.clone(),
            description: view.artifact.description.clone(),
            public_narrative: view.artifact.public_narrative.clone(),
            date_discovered: view.artifact.date_discovered.into(),
            artifact_type: view.artifact.artifact_type.clone(),
            site_id: view.artifact.site_id,
            site_name: view.site_name.clone(),
            primary_image_url: view.primary_image_id.map(public_image_url),
            catalog_records: history
                .iter()
                .map(|(record, notes)| CatalogRecordResponse::project(record, notes))
                .collect(),
        }
    }
}

/// Create/replace payload for an artifact.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRequest {
    pub name: String,
    pub catalog_number: String,
    pub description: Option<String>,
    pub public_narrative: Option<String>,
    pub date_discovered: DateTime<Utc>,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub site_id: i32,
}

impl ArtifactRequest {
    pub fn into_draft(self) -> ArtifactDraft {
        ArtifactDraft {
            name: self.name,
            catalog_number: self.catalog_number,
            description: self.description,
            public_narrative: self.public_narrative,
            date_discovered: self.date_discovered,
            artifact_type: self.artifact_type,
            site_id: self.site_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::artifact;

    fn view(primary: Option<i32>) -> ArtifactView {
        ArtifactView {
            artifact: artifact::Model {
                id: 3,
                name: "Pillar 12".to_string(),
                catalog_number: "GOB-001".to_string(),
                description: Some("Internal narrative".to_string()),
                public_narrative: Some("Carved pillar.".to_string()),
                date_discovered: DateTime::parse_from_rfc3339("1994-10-01T00:00:00Z").unwrap(),
                artifact_type: "Monolith".to_string(),
                site_id: 7,
            },
            site_name: "Gobekli Tepe".to_string(),
            primary_image_id: primary,
        }
    }

    #[test]
    fn public_projection_omits_description_and_history() {
        let json = serde_json::to_value(PublicArtifactResponse::project(&view(Some(11)))).unwrap();
        assert!(json.get("description").is_none());
        assert!(json.get("catalogRecords").is_none());
        assert_eq!(json["type"], "Monolith");
        assert_eq!(json["primaryImageUrl"], "/api/public/artifacts/images/11");
    }

    #[test]
    fn missing_primary_projects_as_null_not_error() {
        let json = serde_json::to_value(PublicArtifactResponse::project(&view(None))).unwrap();
        assert!(json["primaryImageUrl"].is_null());
    }

    #[test]
    fn private_projection_includes_internal_fields() {
        let json =
            serde_json::to_value(PrivateArtifactResponse::project(&view(None), &[])).unwrap();
        assert_eq!(json["description"], "Internal narrative");
        assert!(json["catalogRecords"].as_array().unwrap().is_empty());
    }
}
