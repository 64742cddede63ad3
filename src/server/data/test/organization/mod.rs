use crate::server::{
    data::organization::OrganizationRepository,
    model::{
        organization::{
            CreateOrganizationParams, OrganizationFilter, OrganizationStatus,
            UpdateOrganizationParams,
        },
        pagination::Pagination,
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
mod set_status;
mod slug_taken;
mod update;

fn create_params(name: &str, slug: &str) -> CreateOrganizationParams {
    CreateOrganizationParams {
        parent_id: None,
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        email: None,
        phone: None,
        website: None,
        status: OrganizationStatus::Active,
        record_ordering: 0,
    }
}
