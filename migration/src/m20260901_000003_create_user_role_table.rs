use sea_orm_migration::{prelude::*, schema::*};

use super::{m20260901_000001_create_user_table::User, m20260901_000002_create_role_table::Role};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserRole::Table)
                    .if_not_exists()
                    .col(uuid(UserRole::UserId))
                    .col(uuid(UserRole::RoleId))
                    .col(timestamp_with_time_zone(UserRole::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(UserRole::UserId)
                            .col(UserRole::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_role_user_id")
                            .from(UserRole::Table, UserRole::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_role_role_id")
                            .from(UserRole::Table, UserRole::RoleId)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserRole {
    Table,
    UserId,
    RoleId,
    CreatedAt,
}
