use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Artifact::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Artifact::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Artifact::Name).string().not_null())
                    .col(
                        ColumnDef::new(Artifact::CatalogNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Artifact::Description).text())
                    .col(ColumnDef::new(Artifact::PublicNarrative).text())
                    .col(
                        ColumnDef::new(Artifact::DateDiscovered)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Artifact::ArtifactType).string().not_null())
                    .col(ColumnDef::new(Artifact::SiteId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artifact_site")
                            .from(Artifact::Table, Artifact::SiteId)
                            .to(Site::Table, Site::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_artifact_site")
                    .table(Artifact::Table)
                    .col(Artifact::SiteId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Artifact::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Artifact {
    Table,
    Id,
    Name,
    CatalogNumber,
    Description,
    PublicNarrative,
    DateDiscovered,
    ArtifactType,
    SiteId,
}

#[derive(DeriveIden)]
enum Site {
    Table,
    Id,
}
