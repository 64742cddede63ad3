use crate::server::{
    data::post::PostRepository,
    model::{
        pagination::Pagination,
        post::{CreatePostParams, PostFilter, PostStatus, UpdatePostParams},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
mod update;
