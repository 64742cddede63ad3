use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Menu::Table)
                    .if_not_exists()
                    .col(pk_uuid(Menu::Id))
                    .col(uuid_null(Menu::ParentId))
                    .col(string(Menu::Name))
                    .col(string_null(Menu::Url))
                    .col(string_null(Menu::Icon))
                    .col(string_null(Menu::Target))
                    .col(boolean(Menu::IsActive).default(true))
                    .col(boolean(Menu::IsVisible).default(true))
                    .col(integer(Menu::RecordOrdering).default(0))
                    .col(timestamp_with_time_zone(Menu::CreatedAt))
                    .col(timestamp_with_time_zone(Menu::UpdatedAt))
                    .col(timestamp_with_time_zone_null(Menu::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_parent_id")
                            .from(Menu::Table, Menu::ParentId)
                            .to(Menu::Table, Menu::Id)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_menu_parent_id")
                    .table(Menu::Table)
                    .col(Menu::ParentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Menu::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Menu {
    Table,
    Id,
    ParentId,
    Name,
    Url,
    Icon,
    Target,
    IsActive,
    IsVisible,
    RecordOrdering,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
