use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Job::Table)
                    .if_not_exists()
                    .col(pk_uuid(Job::Id))
                    .col(string(Job::JobType))
                    .col(json(Job::Payload))
                    .col(string(Job::Status).default("pending"))
                    .col(integer(Job::Attempts).default(0))
                    .col(integer(Job::MaxAttempts).default(3))
                    .col(text_null(Job::LastError))
                    .col(timestamp_with_time_zone(Job::RunAt))
                    .col(timestamp_with_time_zone_null(Job::StartedAt))
                    .col(timestamp_with_time_zone_null(Job::FinishedAt))
                    .col(timestamp_with_time_zone(Job::CreatedAt))
                    .col(timestamp_with_time_zone(Job::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_job_status_run_at")
                    .table(Job::Table)
                    .col(Job::Status)
                    .col(Job::RunAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Job::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Job {
    Table,
    Id,
    JobType,
    Payload,
    Status,
    Attempts,
    MaxAttempts,
    LastError,
    RunAt,
    StartedAt,
    FinishedAt,
    CreatedAt,
    UpdatedAt,
}
