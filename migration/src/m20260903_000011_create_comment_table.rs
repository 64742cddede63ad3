use sea_orm_migration::{prelude::*, schema::*};

use super::m20260903_000008_create_post_table::Post;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(pk_uuid(Comment::Id))
                    .col(uuid(Comment::PostId))
                    .col(uuid(Comment::AuthorId))
                    .col(uuid_null(Comment::ParentId))
                    .col(text(Comment::Content))
                    .col(string(Comment::Status).default("pending"))
                    .col(timestamp_with_time_zone(Comment::CreatedAt))
                    .col(timestamp_with_time_zone(Comment::UpdatedAt))
                    .col(timestamp_with_time_zone_null(Comment::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_post_id")
                            .from(Comment::Table, Comment::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Comment {
    Table,
    Id,
    PostId,
    AuthorId,
    ParentId,
    Content,
    Status,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
