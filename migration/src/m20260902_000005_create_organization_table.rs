use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Organization::Table)
                    .if_not_exists()
                    .col(pk_uuid(Organization::Id))
                    .col(uuid_null(Organization::ParentId))
                    .col(string(Organization::Name))
                    .col(string(Organization::Slug))
                    .col(text_null(Organization::Description))
                    .col(string_null(Organization::Email))
                    .col(string_null(Organization::Phone))
                    .col(string_null(Organization::Website))
                    .col(string(Organization::Status).default("active"))
                    .col(integer(Organization::RecordOrdering).default(0))
                    .col(timestamp_with_time_zone(Organization::CreatedAt))
                    .col(timestamp_with_time_zone(Organization::UpdatedAt))
                    .col(timestamp_with_time_zone_null(Organization::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organization_parent_id")
                            .from(Organization::Table, Organization::ParentId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_organization_parent_id")
                    .table(Organization::Table)
                    .col(Organization::ParentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Organization::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Organization {
    Table,
    Id,
    ParentId,
    Name,
    Slug,
    Description,
    Email,
    Phone,
    Website,
    Status,
    RecordOrdering,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
