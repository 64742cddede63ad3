use crate::server::{
    data::notification::NotificationRepository,
    model::{notification::CreateNotificationParams, pagination::Pagination},
};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

mod mark_read;
mod purge_read_before;

fn params(user_id: Uuid) -> CreateNotificationParams {
    CreateNotificationParams {
        user_id,
        kind: "system".to_string(),
        title: "Hello".to_string(),
        body: "Body".to_string(),
    }
}
