use crate::server::{data::rbac::RbacRepository, model::rbac::Policy};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod add;
mod get_for_subjects;

fn policy(subject: &str, object: &str, action: &str) -> Policy {
    Policy {
        subject: subject.to_string(),
        object: object.to_string(),
        action: action.to_string(),
    }
}
