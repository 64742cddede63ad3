//! Polymorphic address domain models and parameters.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

use crate::{
    model::address::{AddressDto, CreateAddressDto, UpdateAddressDto},
    server::error::AppError,
};

/// Kind of record an address is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressableType {
    User,
    Organization,
}

impl AddressableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Organization => "organization",
        }
    }
}

impl fmt::Display for AddressableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressableType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "organization" => Ok(Self::Organization),
            other => Err(AppError::validation(format!(
                "Invalid addressable_type '{}', expected user or organization",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub id: Uuid,
    pub addressable_type: AddressableType,
    pub addressable_id: Uuid,
    pub label: Option<String>,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Address {
    pub fn from_entity(entity: entity::address::Model) -> Result<Self, DbErr> {
        let addressable_type = entity
            .addressable_type
            .parse::<AddressableType>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse addressable_type: {}", e)))?;

        Ok(Self {
            id: entity.id,
            addressable_type,
            addressable_id: entity.addressable_id,
            label: entity.label,
            line1: entity.line1,
            line2: entity.line2,
            city: entity.city,
            state: entity.state,
            postal_code: entity.postal_code,
            country: entity.country,
            is_primary: entity.is_primary,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> AddressDto {
        AddressDto {
            id: self.id,
            addressable_type: self.addressable_type.to_string(),
            addressable_id: self.addressable_id,
            label: self.label,
            line1: self.line1,
            line2: self.line2,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            country: self.country,
            is_primary: self.is_primary,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAddressParams {
    pub addressable_type: AddressableType,
    pub addressable_id: Uuid,
    pub label: Option<String>,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
    pub is_primary: bool,
}

impl CreateAddressParams {
    pub fn from_dto(dto: CreateAddressDto) -> Result<Self, AppError> {
        let addressable_type = dto.addressable_type.parse()?;
        for (field, value) in [
            ("line1", &dto.line1),
            ("city", &dto.city),
            ("country", &dto.country),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("Address {} is required", field)));
            }
        }

        Ok(Self {
            addressable_type,
            addressable_id: dto.addressable_id,
            label: dto.label,
            line1: dto.line1.trim().to_string(),
            line2: dto.line2,
            city: dto.city.trim().to_string(),
            state: dto.state,
            postal_code: dto.postal_code,
            country: dto.country.trim().to_string(),
            is_primary: dto.is_primary,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAddressParams {
    pub label: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub is_primary: Option<bool>,
}

impl UpdateAddressParams {
    pub fn from_dto(dto: UpdateAddressDto) -> Result<Self, AppError> {
        for (field, value) in [
            ("line1", &dto.line1),
            ("city", &dto.city),
            ("country", &dto.country),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(AppError::validation(format!("Address {} cannot be blank", field)));
            }
        }

        Ok(Self {
            label: dto.label,
            line1: dto.line1,
            line2: dto.line2,
            city: dto.city,
            state: dto.state,
            postal_code: dto.postal_code,
            country: dto.country,
            is_primary: dto.is_primary,
        })
    }
}
