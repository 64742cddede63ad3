use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Taxonomy::Table)
                    .if_not_exists()
                    .col(pk_uuid(Taxonomy::Id))
                    .col(uuid_null(Taxonomy::ParentId))
                    .col(string(Taxonomy::Name))
                    .col(string(Taxonomy::Slug))
                    .col(string(Taxonomy::Kind))
                    .col(text_null(Taxonomy::Description))
                    .col(integer(Taxonomy::RecordOrdering).default(0))
                    .col(timestamp_with_time_zone(Taxonomy::CreatedAt))
                    .col(timestamp_with_time_zone(Taxonomy::UpdatedAt))
                    .col(timestamp_with_time_zone_null(Taxonomy::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_taxonomy_parent_id")
                            .from(Taxonomy::Table, Taxonomy::ParentId)
                            .to(Taxonomy::Table, Taxonomy::Id)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_taxonomy_parent_id")
                    .table(Taxonomy::Table)
                    .col(Taxonomy::ParentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Taxonomy::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Taxonomy {
    Table,
    Id,
    ParentId,
    Name,
    Slug,
    Kind,
    Description,
    RecordOrdering,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
