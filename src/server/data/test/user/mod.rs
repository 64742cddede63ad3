use crate::server::{
    data::user::UserRepository,
    model::{
        pagination::Pagination,
        user::{CreateUserParams, UpdateUserParams},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod find_by_login;
mod get_paginated;
mod soft_delete;
mod update;
