use super::*;
use crate::server::{
    model::rbac::{Action, Policy},
    service::{rbac::RbacService, role::RoleService},
};

mod enforce;
mod seed;
