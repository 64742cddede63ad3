use super::*;
use crate::server::{
    model::{
        organization::{
            CreateOrganizationParams, Organization, OrganizationFilter, OrganizationStatus,
        },
        pagination::Pagination,
        taxonomy::CreateTaxonomyParams,
    },
    service::{
        hierarchy::HierarchyService, organization::OrganizationService,
        taxonomy::TaxonomyService,
    },
};

mod delete;
mod deleted_parent;
mod move_subtree;
mod reads;
mod set_status;
mod taxonomy;
