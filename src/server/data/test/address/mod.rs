use crate::server::{
    data::address::AddressRepository,
    model::address::{AddressableType, CreateAddressParams, UpdateAddressParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

mod create;
mod update;

fn params(owner: Uuid, is_primary: bool) -> CreateAddressParams {
    CreateAddressParams {
        addressable_type: AddressableType::User,
        addressable_id: owner,
        label: None,
        line1: "1 Main St".to_string(),
        line2: None,
        city: "Springfield".to_string(),
        state: None,
        postal_code: None,
        country: "US".to_string(),
        is_primary,
    }
}
