use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A `(subject, object, action)` rule. `subject` is a role name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PolicyDto {
    pub subject: String,
    pub object: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckPermissionDto {
    pub user_id: Uuid,
    pub object: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PermissionCheckResultDto {
    pub allowed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserPermissionsDto {
    pub user_id: Uuid,
    pub roles: Vec<String>,
    pub permissions: Vec<PolicyDto>,
}
