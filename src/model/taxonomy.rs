use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaxonomyDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub kind: String,
    pub description: Option<String>,
    pub record_ordering: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTaxonomyDto {
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: Option<String>,
    pub kind: String,
    pub description: Option<String>,
    pub record_ordering: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTaxonomyDto {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub record_ordering: Option<i32>,
}
