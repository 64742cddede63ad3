use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Nested tree node. The item's own fields are flattened next to `children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNodeDto<T> {
    #[serde(flatten)]
    pub item: T,
    pub children: Vec<TreeNodeDto<T>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MoveDto {
    /// New parent, or `null` to make the entity a root.
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidateHierarchyDto {
    pub parent_id: Uuid,
    pub child_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HierarchyValidationDto {
    pub valid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubtreeDeletedDto {
    pub deleted: u64,
}
