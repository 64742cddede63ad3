use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{
        address::AddressRepository, hierarchy::HierarchyRepository, user::UserRepository,
    },
    error::AppError,
    model::address::{Address, AddressableType, CreateAddressParams, UpdateAddressParams},
};

pub struct AddressService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AddressService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an address for a user or organization.
    ///
    /// A primary address demotes the owner's previous primary.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Owner missing or deleted
    pub async fn create(&self, params: CreateAddressParams) -> Result<Address, AppError> {
        self.ensure_owner(params.addressable_type, params.addressable_id)
            .await?;

        Ok(AddressRepository::new(self.db).create(params).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Address, AppError> {
        AddressRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("address {} not found", id)))
    }

    pub async fn get_by_owner(
        &self,
        addressable_type: AddressableType,
        addressable_id: Uuid,
    ) -> Result<Vec<Address>, AppError> {
        self.ensure_owner(addressable_type, addressable_id).await?;

        Ok(AddressRepository::new(self.db)
            .get_by_owner(addressable_type, addressable_id)
            .await?)
    }

    pub async fn update(&self, id: Uuid, params: UpdateAddressParams) -> Result<Address, AppError> {
        AddressRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::not_found(format!("address {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !AddressRepository::new(self.db).delete(id).await? {
            return Err(AppError::not_found(format!("address {} not found", id)));
        }

        Ok(())
    }

    async fn ensure_owner(
        &self,
        addressable_type: AddressableType,
        addressable_id: Uuid,
    ) -> Result<(), AppError> {
        let exists = match addressable_type {
            AddressableType::User => UserRepository::new(self.db)
                .find_by_id(addressable_id)
                .await?
                .is_some(),
            AddressableType::Organization => {
                HierarchyRepository::<entity::organization::Entity>::new(self.db)
                    .find_live(addressable_id)
                    .await?
                    .is_some()
            }
        };

        if !exists {
            return Err(AppError::not_found(format!(
                "{} {} not found",
                addressable_type, addressable_id
            )));
        }

        Ok(())
    }
}
