//! Seeding service.
//!
//! Seeds users, sites, artifacts, demo media and catalog records, in that
//! order. Import rows with unresolved references (artifact catalog number,
//! user email) are logged and skipped one at a time; the batch continues.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use entity::{artifact, artifact_media_file, catalog_note, catalog_record, site, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::modules::artifacts::ArtifactType;
use crate::modules::catalog::CatalogStatus;

/// Errors that abort seeding outright. Unresolved references inside a batch
/// are not errors; they are skipped rows.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed seed file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteImport {
    pub id: Option<i32>,
    pub name: String,
    pub location: String,
    pub coordinates: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    pub public_narrative: Option<String>,
    pub aeon_narrative: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactImport {
    pub id: Option<i32>,
    pub name: String,
    pub catalog_number: String,
    pub description: Option<String>,
    pub public_narrative: Option<String>,
    pub date_discovered: String,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub site_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecordImport {
    pub artifact_catalog_number: String,
    /// Submitter's email.
    pub submitted_by: String,
    /// Verifier's email, when already reviewed.
    pub verified_by: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    pub date_submitted: String,
    #[serde(default)]
    pub notes: Vec<CatalogNoteImport>,
}

fn default_status() -> String {
    CatalogStatus::Draft.as_str().to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogNoteImport {
    /// Author's email.
    pub author: String,
    pub content: String,
    pub created: String,
}

/// Outcome of one import batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Service that populates an empty database.
pub struct SeedService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SeedService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Run every seeder in dependency order against the seed directory.
    pub async fn run(&self, data_dir: &Path) -> Result<(), ServiceError> {
        self.seed_users().await?;
        self.seed_sites_from_file(&data_dir.join("sites.json")).await?;
        self.seed_artifacts_from_file(&data_dir.join("artifacts.json"))
            .await?;
        self.seed_media_from_dir(&data_dir.join("Images")).await?;
        self.seed_catalog_records_from_dir(data_dir).await?;
        Ok(())
    }

    /// Insert the fixed user set when the table is empty.
    pub async fn seed_users(&self) -> Result<(), ServiceError> {
        if user::Entity::find().count(self.db).await? > 0 {
            return Ok(());
        }

        let fixtures = [
            ("Admin", "User", "admin@aeon.org"),
            ("Archivist", "User", "archivist@aeon.org"),
            ("Researcher", "User", "researcher@aeon.org"),
            ("Viewer", "User", "viewer@aeon.org"),
        ];

        for (first, last, email) in fixtures {
            user::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                email: Set(email.to_string()),
                first_name: Set(first.to_string()),
                last_name: Set(last.to_string()),
                created_at: Set(Utc::now().into()),
            }
            .insert(self.db)
            .await?;
        }

        info!(count = fixtures.len(), "Seeded users");
        Ok(())
    }

    pub async fn seed_sites_from_file(&self, path: &Path) -> Result<(), ServiceError> {
        if site::Entity::find().count(self.db).await? > 0 {
            return Ok(());
        }
        if !path.exists() {
            warn!(path = %path.display(), "Sites seed file not found, skipping");
            return Ok(());
        }

        let sites: Vec<SiteImport> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        let count = self.import_sites(sites).await?;
        info!(count, "Seeded sites");
        Ok(())
    }

    pub async fn import_sites(&self, sites: Vec<SiteImport>) -> Result<usize, ServiceError> {
        let mut count = 0;
        for s in sites {
            let mut active = site::ActiveModel {
                name: Set(s.name),
                location: Set(s.location),
                coordinates: Set(s.coordinates),
                latitude: Set(s.latitude),
                longitude: Set(s.longitude),
                description: Set(s.description),
                public_narrative: Set(s.public_narrative),
                aeon_narrative: Set(s.aeon_narrative),
                ..Default::default()
            };
            if let Some(id) = s.id {
                active.id = Set(id);
            }
            active.insert(self.db).await?;
            count += 1;
        }
        Ok(count)
    }

    pub async fn seed_artifacts_from_file(&self, path: &Path) -> Result<(), ServiceError> {
        if artifact::Entity::find().count(self.db).await? > 0 {
            return Ok(());
        }
        if !path.exists() {
            warn!(path = %path.display(), "Artifact seed file not found, skipping");
            return Ok(());
        }

        let artifacts: Vec<ArtifactImport> =
            serde_json::from_str(&std::fs::read_to_string(path)?)?;
        let summary = self.import_artifacts(artifacts).await?;
        info!(
            imported = summary.imported,
            skipped = summary.skipped,
            "Seeded artifacts"
        );
        Ok(())
    }

    /// Import artifact rows, skipping any with an unknown site, an
    /// unparseable type or an unparseable date.
    pub async fn import_artifacts(
        &self,
        artifacts: Vec<ArtifactImport>,
    ) -> Result<ImportSummary, ServiceError> {
        let mut summary = ImportSummary::default();

        for a in artifacts {
            let Ok(artifact_type) = ArtifactType::parse(&a.artifact_type) else {
                warn!(catalog_number = %a.catalog_number, artifact_type = %a.artifact_type, "Unknown artifact type, skipping row");
                summary.skipped += 1;
                continue;
            };

            let Some(date_discovered) = parse_utc(&a.date_discovered) else {
                warn!(catalog_number = %a.catalog_number, date = %a.date_discovered, "Unparseable discovery date, skipping row");
                summary.skipped += 1;
                continue;
            };

            if site::Entity::find_by_id(a.site_id).one(self.db).await?.is_none() {
                warn!(catalog_number = %a.catalog_number, site_id = a.site_id, "Site not found, skipping row");
                summary.skipped += 1;
                continue;
            }

            let mut active = artifact::ActiveModel {
                name: Set(a.name),
                catalog_number: Set(a.catalog_number),
                description: Set(a.description),
                public_narrative: Set(a.public_narrative),
                date_discovered: Set(date_discovered.into()),
                artifact_type: Set(artifact_type.as_str().to_string()),
                site_id: Set(a.site_id),
                ..Default::default()
            };
            if let Some(id) = a.id {
                active.id = Set(id);
            }
            active.insert(self.db).await?;
            summary.imported += 1;
        }

        Ok(summary)
    }

    /// Seed demo images from a directory. The owning artifact is derived
    /// from the file-name prefix: "ATL-001-a.jpg" belongs to "ATL-001".
    /// The first image stored per artifact becomes its primary.
    pub async fn seed_media_from_dir(&self, dir: &Path) -> Result<(), ServiceError> {
        if artifact_media_file::Entity::find().count(self.db).await? > 0 {
            return Ok(());
        }
        if !dir.is_dir() {
            warn!(path = %dir.display(), "No seed image directory, skipping");
            return Ok(());
        }

        let mut count = 0;
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase());
            let content_type = match ext.as_deref() {
                Some("jpg") | Some("jpeg") => "image/jpeg",
                Some("png") => "image/png",
                _ => {
                    warn!(path = %path.display(), "Skipping non-image file");
                    continue;
                }
            };

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let catalog_number = catalog_number_from_stem(stem);

            let Some(artifact) = artifact::Entity::find()
                .filter(artifact::Column::CatalogNumber.eq(catalog_number.clone()))
                .one(self.db)
                .await?
            else {
                warn!(file = %path.display(), catalog_number = %catalog_number, "No artifact for image, skipping");
                continue;
            };

            let has_primary = artifact_media_file::Entity::find()
                .filter(artifact_media_file::Column::ArtifactId.eq(artifact.id))
                .filter(artifact_media_file::Column::IsPrimary.eq(true))
                .count(self.db)
                .await?
                > 0;

            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(stem)
                .to_string();

            artifact_media_file::ActiveModel {
                artifact_id: Set(artifact.id),
                file_name: Set(file_name),
                content_type: Set(content_type.to_string()),
                data: Set(std::fs::read(&path)?),
                is_primary: Set(!has_primary),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
            count += 1;
        }

        info!(count, "Seeded artifact images");
        Ok(())
    }

    /// Seed catalog records from every `catalogRecords.*.json` file in the
    /// seed directory.
    pub async fn seed_catalog_records_from_dir(&self, dir: &Path) -> Result<(), ServiceError> {
        if catalog_record::Entity::find().count(self.db).await? > 0 {
            info!("Catalog records already exist, skipping seeding");
            return Ok(());
        }
        if !dir.is_dir() {
            return Ok(());
        }

        let mut total = ImportSummary::default();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !(name.starts_with("catalogRecords.") && name.ends_with(".json")) {
                continue;
            }

            let records: Vec<CatalogRecordImport> =
                serde_json::from_str(&std::fs::read_to_string(&path)?)?;
            let summary = self.import_catalog_records(records).await?;
            total.imported += summary.imported;
            total.skipped += summary.skipped;
        }

        info!(
            imported = total.imported,
            skipped = total.skipped,
            "Seeded catalog records"
        );
        Ok(())
    }

    /// Import catalog record rows. A row whose artifact or submitter cannot
    /// be resolved is skipped; an unresolvable note author drops that note
    /// only. Each surviving record is written with its notes in one
    /// transaction.
    pub async fn import_catalog_records(
        &self,
        records: Vec<CatalogRecordImport>,
    ) -> Result<ImportSummary, ServiceError> {
        let mut summary = ImportSummary::default();

        for r in records {
            let Some(artifact) = artifact::Entity::find()
                .filter(artifact::Column::CatalogNumber.eq(r.artifact_catalog_number.clone()))
                .one(self.db)
                .await?
            else {
                warn!(catalog_number = %r.artifact_catalog_number, "Artifact not found, skipping record");
                summary.skipped += 1;
                continue;
            };

            let Some(submitted_by) = self.user_by_email(&r.submitted_by).await? else {
                warn!(email = %r.submitted_by, "SubmittedBy user not found, skipping record");
                summary.skipped += 1;
                continue;
            };

            let verified_by = match &r.verified_by {
                Some(email) if !email.is_empty() => self.user_by_email(email).await?,
                _ => None,
            };

            let Ok(status) = CatalogStatus::parse(&r.status) else {
                warn!(status = %r.status, "Unknown catalog status, skipping record");
                summary.skipped += 1;
                continue;
            };

            let Some(date_submitted) = parse_utc(&r.date_submitted) else {
                warn!(date = %r.date_submitted, "Unparseable submission date, skipping record");
                summary.skipped += 1;
                continue;
            };

            let txn = self.db.begin().await?;

            let record = catalog_record::ActiveModel {
                artifact_id: Set(artifact.id),
                submitted_by_id: Set(submitted_by.id),
                verified_by_id: Set(verified_by.map(|u| u.id)),
                status: Set(status.as_str().to_string()),
                date_submitted: Set(date_submitted.into()),
                date_verified: Set(None),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            for note in &r.notes {
                let Some(author) = self.user_by_email_on(&txn, &note.author).await? else {
                    warn!(email = %note.author, "Note author not found, skipping note");
                    continue;
                };

                let created = parse_utc(&note.created).unwrap_or_else(Utc::now);

                catalog_note::ActiveModel {
                    catalog_record_id: Set(record.id),
                    author_id: Set(author.id),
                    content: Set(note.content.clone()),
                    created: Set(created.into()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }

            txn.commit().await?;
            summary.imported += 1;
        }

        Ok(summary)
    }

    async fn user_by_email_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        email: &str,
    ) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(conn)
            .await?)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
        self.user_by_email_on(self.db, email).await
    }
}

/// Derive "ATL-001" from "ATL-001-a"; stems without two dash-separated
/// leading parts are used as-is.
fn catalog_number_from_stem(stem: &str) -> String {
    let parts: Vec<&str> = stem.split('-').collect();
    if parts.len() >= 2 {
        format!("{}-{}", parts[0], parts[1])
    } else {
        stem.to_string()
    }
}

/// Parse a seed timestamp, coercing zone-less values to UTC.
fn parse_utc(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
