use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArtifactMediaFile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ArtifactMediaFile::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ArtifactMediaFile::ArtifactId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ArtifactMediaFile::FileName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ArtifactMediaFile::ContentType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ArtifactMediaFile::Data)
                            .binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ArtifactMediaFile::IsPrimary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_media_file_artifact")
                            .from(ArtifactMediaFile::Table, ArtifactMediaFile::ArtifactId)
                            .to(Artifact::Table, Artifact::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_media_file_artifact")
                    .table(ArtifactMediaFile::Table)
                    .col(ArtifactMediaFile::ArtifactId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArtifactMediaFile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ArtifactMediaFile {
    Table,
    Id,
    ArtifactId,
    FileName,
    ContentType,
    Data,
    IsPrimary,
}

#[derive(DeriveIden)]
enum Artifact {
    Table,
    Id,
}
