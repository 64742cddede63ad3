use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RbacPolicy::Table)
                    .if_not_exists()
                    .col(pk_uuid(RbacPolicy::Id))
                    .col(string(RbacPolicy::Subject))
                    .col(string(RbacPolicy::Object))
                    .col(string(RbacPolicy::Action))
                    .col(timestamp_with_time_zone(RbacPolicy::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rbac_policy_rule")
                    .table(RbacPolicy::Table)
                    .col(RbacPolicy::Subject)
                    .col(RbacPolicy::Object)
                    .col(RbacPolicy::Action)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RbacPolicy::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RbacPolicy {
    Table,
    Id,
    Subject,
    Object,
    Action,
    CreatedAt,
}
