use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Site::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Site::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Site::Name).string().not_null())
                    .col(ColumnDef::new(Site::Location).string().not_null())
                    .col(ColumnDef::new(Site::Coordinates).string())
                    .col(ColumnDef::new(Site::Latitude).double().not_null())
                    .col(ColumnDef::new(Site::Longitude).double().not_null())
                    .col(ColumnDef::new(Site::Description).string())
                    .col(ColumnDef::new(Site::PublicNarrative).text())
                    .col(ColumnDef::new(Site::AeonNarrative).text())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Site::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Site {
    Table,
    Id,
    Name,
    Location,
    Coordinates,
    Latitude,
    Longitude,
    Description,
    PublicNarrative,
    AeonNarrative,
}
