pub use sea_orm_migration::prelude::*;

mod m20260114_100000_create_user;
mod m20260114_100001_create_site;
mod m20260114_100002_create_artifact;
mod m20260114_100003_create_artifact_media_file;
mod m20260114_100004_create_catalog_record;
mod m20260114_100005_create_catalog_note;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260114_100000_create_user::Migration),
            Box::new(m20260114_100001_create_site::Migration),
            Box::new(m20260114_100002_create_artifact::Migration),
            Box::new(m20260114_100003_create_artifact_media_file::Migration),
            Box::new(m20260114_100004_create_catalog_record::Migration),
            Box::new(m20260114_100005_create_catalog_note::Migration),
        ]
    }
}
