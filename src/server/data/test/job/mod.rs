use crate::server::{
    data::job::JobRepository,
    model::job::{EnqueueJobParams, JobKind, JobStatus},
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod claim_due;
mod mark_failed;
mod reclaim_stale;
mod transition;
