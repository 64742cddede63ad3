use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub target: Option<String>,
    pub is_active: bool,
    pub is_visible: bool,
    pub record_ordering: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMenuDto {
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub target: Option<String>,
    pub is_active: Option<bool>,
    pub is_visible: Option<bool>,
    pub record_ordering: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateMenuDto {
    pub name: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub target: Option<String>,
    pub record_ordering: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuActiveDto {
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuVisibleDto {
    pub is_visible: bool,
}
