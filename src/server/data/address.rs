//! Repository for addresses attached to users or organizations.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::server::model::address::{
    Address, AddressableType, CreateAddressParams, UpdateAddressParams,
};

pub struct AddressRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Clears the primary flag on every address of the owner except `keep`.
async fn clear_primary<C: ConnectionTrait>(
    db: &C,
    addressable_type: &str,
    addressable_id: Uuid,
    keep: Uuid,
) -> Result<(), DbErr> {
    entity::prelude::Address::update_many()
        .col_expr(entity::address::Column::IsPrimary, Expr::value(false))
        .filter(entity::address::Column::AddressableType.eq(addressable_type))
        .filter(entity::address::Column::AddressableId.eq(addressable_id))
        .filter(entity::address::Column::Id.ne(keep))
        .exec(db)
        .await?;

    Ok(())
}

impl<'a> AddressRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an address. A primary address demotes the owner's other addresses.
    pub async fn create(&self, params: CreateAddressParams) -> Result<Address, DbErr> {
        let txn = self.db.begin().await?;
        let now = Utc::now();
        let id = Uuid::new_v4();

        let entity = entity::address::ActiveModel {
            id: ActiveValue::Set(id),
            addressable_type: ActiveValue::Set(params.addressable_type.to_string()),
            addressable_id: ActiveValue::Set(params.addressable_id),
            label: ActiveValue::Set(params.label),
            line1: ActiveValue::Set(params.line1),
            line2: ActiveValue::Set(params.line2),
            city: ActiveValue::Set(params.city),
            state: ActiveValue::Set(params.state),
            postal_code: ActiveValue::Set(params.postal_code),
            country: ActiveValue::Set(params.country),
            is_primary: ActiveValue::Set(params.is_primary),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(&txn)
        .await?;
        if params.is_primary {
            clear_primary(&txn, params.addressable_type.as_str(), params.addressable_id, id).await?;
        }

        txn.commit().await?;

        Address::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Address>, DbErr> {
        entity::prelude::Address::find_by_id(id)
            .one(self.db)
            .await?
            .map(Address::from_entity)
            .transpose()
    }

    /// Addresses of one owner, primary first.
    pub async fn get_by_owner(
        &self,
        addressable_type: AddressableType,
        addressable_id: Uuid,
    ) -> Result<Vec<Address>, DbErr> {
        entity::prelude::Address::find()
            .filter(entity::address::Column::AddressableType.eq(addressable_type.as_str()))
            .filter(entity::address::Column::AddressableId.eq(addressable_id))
            .order_by_desc(entity::address::Column::IsPrimary)
            .order_by_asc(entity::address::Column::CreatedAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Address::from_entity)
            .collect()
    }

    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateAddressParams,
    ) -> Result<Option<Address>, DbErr> {
        let txn = self.db.begin().await?;

        let Some(existing) = entity::prelude::Address::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };
        let owner = existing.addressable_id;
        let owner_type = existing.addressable_type.clone();

        let mut active: entity::address::ActiveModel = existing.into();
        if let Some(label) = params.label {
            active.label = ActiveValue::Set(Some(label));
        }
        if let Some(line1) = params.line1 {
            active.line1 = ActiveValue::Set(line1);
        }
        if let Some(line2) = params.line2 {
            active.line2 = ActiveValue::Set(Some(line2));
        }
        if let Some(city) = params.city {
            active.city = ActiveValue::Set(city);
        }
        if let Some(state) = params.state {
            active.state = ActiveValue::Set(Some(state));
        }
        if let Some(postal_code) = params.postal_code {
            active.postal_code = ActiveValue::Set(Some(postal_code));
        }
        if let Some(country) = params.country {
            active.country = ActiveValue::Set(country);
        }
        if let Some(is_primary) = params.is_primary {
            active.is_primary = ActiveValue::Set(is_primary);
        }
        active.updated_at = ActiveValue::Set(Utc::now());
        let updated = active.update(&txn).await?;

        if params.is_primary == Some(true) {
            clear_primary(&txn, &owner_type, owner, id).await?;
        }

        txn.commit().await?;

        Address::from_entity(updated).map(Some)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Address::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
