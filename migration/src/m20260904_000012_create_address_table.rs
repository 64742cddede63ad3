use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Address::Table)
                    .if_not_exists()
                    .col(pk_uuid(Address::Id))
                    .col(string(Address::AddressableType))
                    .col(uuid(Address::AddressableId))
                    .col(string_null(Address::Label))
                    .col(string(Address::Line1))
                    .col(string_null(Address::Line2))
                    .col(string(Address::City))
                    .col(string_null(Address::State))
                    .col(string_null(Address::PostalCode))
                    .col(string(Address::Country))
                    .col(boolean(Address::IsPrimary).default(false))
                    .col(timestamp_with_time_zone(Address::CreatedAt))
                    .col(timestamp_with_time_zone(Address::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_address_addressable")
                    .table(Address::Table)
                    .col(Address::AddressableType)
                    .col(Address::AddressableId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Address::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Address {
    Table,
    Id,
    AddressableType,
    AddressableId,
    Label,
    Line1,
    Line2,
    City,
    State,
    PostalCode,
    Country,
    IsPrimary,
    CreatedAt,
    UpdatedAt,
}
