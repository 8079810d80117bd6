//! Shared setup for integration tests: an in-memory database run through the
//! real migrations, plus fixture builders.

use chrono::Utc;
use entity::{artifact, site, user};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, DatabaseConnection, Set};

/// Connect to a fresh in-memory SQLite database and run all migrations.
///
/// A single connection is required so every statement sees the same
/// in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).sqlx_logging(false);

    let db = sea_orm::Database::connect(opt)
        .await
        .expect("connect to in-memory sqlite");

    Migrator::up(&db, None).await.expect("run migrations");

    db
}

pub async fn create_user(db: &DatabaseConnection, id: &str, email: &str) -> user::Model {
    user::ActiveModel {
        id: Set(id.to_string()),
        email: Set(email.to_string()),
        first_name: Set("Test".to_string()),
        last_name: Set("User".to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .expect("insert user")
}

pub async fn create_site(db: &DatabaseConnection, name: &str) -> site::Model {
    site::ActiveModel {
        name: Set(name.to_string()),
        location: Set("Anatolia".to_string()),
        coordinates: Set(None),
        latitude: Set(37.22),
        longitude: Set(38.92),
        description: Set(Some("Internal survey notes".to_string())),
        public_narrative: Set(Some("An ancient hilltop sanctuary.".to_string())),
        aeon_narrative: Set(Some("Restricted commentary".to_string())),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert site")
}

pub async fn create_artifact(
    db: &DatabaseConnection,
    site_id: i32,
    catalog_number: &str,
) -> artifact::Model {
    artifact::ActiveModel {
        name: Set(format!("Artifact {catalog_number}")),
        catalog_number: Set(catalog_number.to_string()),
        description: Set(Some("Internal description".to_string())),
        public_narrative: Set(Some("Public story".to_string())),
        date_discovered: Set(Utc::now().into()),
        artifact_type: Set("Monolith".to_string()),
        site_id: Set(site_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert artifact")
}
