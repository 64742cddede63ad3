use crate::server::{
    config::test_config,
    error::{auth::AuthError, AppError},
};
use test_utils::{builder::TestBuilder, factory};

mod auth;
mod backup;
mod content;
mod hierarchy;
mod job;
mod media;
mod rbac;
mod search;
