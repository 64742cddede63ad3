use crate::server::{
    data::role::RoleRepository,
    model::role::{CreateRoleParams, UpdateRoleParams},
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod assign;
mod create;
mod delete;
