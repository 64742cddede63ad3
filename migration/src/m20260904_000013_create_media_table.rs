use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Media::Table)
                    .if_not_exists()
                    .col(pk_uuid(Media::Id))
                    .col(uuid(Media::UploadedBy))
                    .col(string(Media::FileName))
                    .col(string_uniq(Media::StorageKey))
                    .col(string(Media::ContentType))
                    .col(big_integer(Media::SizeBytes))
                    .col(string_null(Media::AltText))
                    .col(timestamp_with_time_zone(Media::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Media::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Media {
    Table,
    Id,
    UploadedBy,
    FileName,
    StorageKey,
    ContentType,
    SizeBytes,
    AltText,
    CreatedAt,
}
