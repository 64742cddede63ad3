use crate::server::data::hierarchy::HierarchyRepository;
use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod ancestors;
mod children;
mod delete_and_reparent;
mod delete_subtree;
mod descendants;
