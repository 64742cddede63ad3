//! RBAC policy rules and the action vocabulary.

use std::{fmt, str::FromStr};

use uuid::Uuid;

use crate::{
    model::rbac::{PolicyDto, UserPermissionsDto},
    server::error::AppError,
};

/// Wildcard matching any object or action.
pub const WILDCARD: &str = "*";

/// Actions a policy can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Self::Read),
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(AppError::validation(format!(
                "Unknown action '{}', expected read, create, update, delete or *",
                other
            ))),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(subject, object, action)` rule where subject is a role name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub subject: String,
    pub object: String,
    pub action: String,
}

impl Policy {
    pub fn from_entity(entity: entity::rbac_policy::Model) -> Self {
        Self {
            subject: entity.subject,
            object: entity.object,
            action: entity.action,
        }
    }

    /// Validates a policy received over the wire.
    ///
    /// The action must be part of the vocabulary or `*`; subject and object must be
    /// non-empty.
    pub fn from_dto(dto: PolicyDto) -> Result<Self, AppError> {
        let subject = dto.subject.trim().to_string();
        let object = dto.object.trim().to_string();
        let action = dto.action.trim().to_lowercase();

        if subject.is_empty() || object.is_empty() {
            return Err(AppError::validation("Policy subject and object are required"));
        }
        if action != WILDCARD {
            action.parse::<Action>()?;
        }

        Ok(Self {
            subject,
            object,
            action,
        })
    }

    pub fn into_dto(self) -> PolicyDto {
        PolicyDto {
            subject: self.subject,
            object: self.object,
            action: self.action,
        }
    }

    /// Whether this rule grants `action` on `object`, honoring wildcards.
    pub fn grants(&self, object: &str, action: &str) -> bool {
        (self.object == WILDCARD || self.object == object)
            && (self.action == WILDCARD || self.action == action)
    }
}

/// Roles held by a user and every rule those roles carry.
#[derive(Debug, Clone)]
pub struct UserPermissions {
    pub user_id: Uuid,
    pub roles: Vec<String>,
    pub permissions: Vec<Policy>,
}

impl UserPermissions {
    pub fn allows(&self, object: &str, action: &str) -> bool {
        self.permissions.iter().any(|p| p.grants(object, action))
    }

    pub fn into_dto(self) -> UserPermissionsDto {
        UserPermissionsDto {
            user_id: self.user_id,
            roles: self.roles,
            permissions: self.permissions.into_iter().map(Policy::into_dto).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(object: &str, action: &str) -> Policy {
        Policy {
            subject: "editor".to_string(),
            object: object.to_string(),
            action: action.to_string(),
        }
    }

    #[test]
    fn exact_rule_matches_only_its_pair() {
        let rule = policy("posts", "update");
        assert!(rule.grants("posts", "update"));
        assert!(!rule.grants("posts", "delete"));
        assert!(!rule.grants("tags", "update"));
    }

    #[test]
    fn wildcards_match_anything() {
        assert!(policy("*", "*").grants("backups", "create"));
        assert!(policy("posts", "*").grants("posts", "delete"));
        assert!(!policy("posts", "*").grants("tags", "delete"));
        assert!(policy("*", "read").grants("menus", "read"));
    }

    #[test]
    fn rejects_unknown_action() {
        let result = Policy::from_dto(PolicyDto {
            subject: "editor".to_string(),
            object: "posts".to_string(),
            action: "publish".to_string(),
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
