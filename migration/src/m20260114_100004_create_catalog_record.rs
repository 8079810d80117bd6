//! Catalog record table. User references are restrict-on-delete: a user
//! cannot be removed while records name them as submitter or verifier.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CatalogRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CatalogRecord::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CatalogRecord::ArtifactId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CatalogRecord::SubmittedById)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CatalogRecord::VerifiedById).string())
                    .col(ColumnDef::new(CatalogRecord::Status).string().not_null())
                    .col(
                        ColumnDef::new(CatalogRecord::DateSubmitted)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CatalogRecord::DateVerified)
                            .timestamp_with_time_zone(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_catalog_record_artifact")
                            .from(CatalogRecord::Table, CatalogRecord::ArtifactId)
                            .to(Artifact::Table, Artifact::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_catalog_record_submitted_by")
                            .from(CatalogRecord::Table, CatalogRecord::SubmittedById)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_catalog_record_verified_by")
                            .from(CatalogRecord::Table, CatalogRecord::VerifiedById)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_catalog_record_artifact")
                    .table(CatalogRecord::Table)
                    .col(CatalogRecord::ArtifactId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CatalogRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CatalogRecord {
    Table,
    Id,
    ArtifactId,
    SubmittedById,
    VerifiedById,
    Status,
    DateSubmitted,
    DateVerified,
}

#[derive(DeriveIden)]
enum Artifact {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
