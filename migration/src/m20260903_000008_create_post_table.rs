use sea_orm_migration::{prelude::*, schema::*};

use super::m20260901_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(pk_uuid(Post::Id))
                    .col(uuid(Post::AuthorId))
                    .col(string(Post::Title))
                    .col(string(Post::Slug))
                    .col(text(Post::Content))
                    .col(text_null(Post::Excerpt))
                    .col(string(Post::Status).default("draft"))
                    .col(timestamp_with_time_zone_null(Post::PublishedAt))
                    .col(timestamp_with_time_zone(Post::CreatedAt))
                    .col(timestamp_with_time_zone(Post::UpdatedAt))
                    .col(timestamp_with_time_zone_null(Post::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_author_id")
                            .from(Post::Table, Post::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Post {
    Table,
    Id,
    AuthorId,
    Title,
    Slug,
    Content,
    Excerpt,
    Status,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
