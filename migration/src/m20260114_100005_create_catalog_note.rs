use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CatalogNote::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CatalogNote::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CatalogNote::CatalogRecordId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CatalogNote::AuthorId).string().not_null())
                    .col(ColumnDef::new(CatalogNote::Content).text().not_null())
                    .col(
                        ColumnDef::new(CatalogNote::Created)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_catalog_note_record")
                            .from(CatalogNote::Table, CatalogNote::CatalogRecordId)
                            .to(CatalogRecord::Table, CatalogRecord::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_catalog_note_author")
                            .from(CatalogNote::Table, CatalogNote::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_catalog_note_record")
                    .table(CatalogNote::Table)
                    .col(CatalogNote::CatalogRecordId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CatalogNote::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CatalogNote {
    Table,
    Id,
    CatalogRecordId,
    AuthorId,
    Content,
    Created,
}

#[derive(DeriveIden)]
enum CatalogRecord {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
