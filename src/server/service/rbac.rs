//! Role-based access control over `(subject, object, action)` policies.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{rbac::RbacRepository, role::RoleRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{
        rbac::{Action, Policy, UserPermissions, WILDCARD},
        role::{CreateRoleParams, Role, ADMIN_ROLE},
    },
};

pub struct RbacService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RbacService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Ensures the admin role and its `(admin, *, *)` policy exist.
    ///
    /// Safe to call repeatedly; runs at startup and on first registration.
    pub async fn seed(&self) -> Result<Role, AppError> {
        let role_repo = RoleRepository::new(self.db);

        let admin = match role_repo.find_by_name(ADMIN_ROLE).await? {
            Some(role) => role,
            None => {
                role_repo
                    .create(CreateRoleParams {
                        name: ADMIN_ROLE.to_string(),
                        description: Some("Unrestricted access".to_string()),
                    })
                    .await?
            }
        };

        let added = RbacRepository::new(self.db)
            .add(Policy {
                subject: ADMIN_ROLE.to_string(),
                object: WILDCARD.to_string(),
                action: WILDCARD.to_string(),
            })
            .await?;
        if added {
            tracing::info!("Seeded admin policy");
        }

        Ok(admin)
    }

    pub async fn get_policies(&self) -> Result<Vec<Policy>, AppError> {
        Ok(RbacRepository::new(self.db).get_all().await?)
    }

    /// Adds a policy for an existing role. Adding a policy twice succeeds unchanged.
    pub async fn add_policy(&self, policy: Policy) -> Result<Policy, AppError> {
        if RoleRepository::new(self.db)
            .find_by_name(&policy.subject)
            .await?
            .is_none()
        {
            return Err(AppError::not_found(format!(
                "role '{}' not found",
                policy.subject
            )));
        }

        RbacRepository::new(self.db).add(policy.clone()).await?;

        Ok(policy)
    }

    pub async fn remove_policy(&self, policy: &Policy) -> Result<(), AppError> {
        if !RbacRepository::new(self.db).remove(policy).await? {
            return Err(AppError::not_found("policy not found"));
        }

        Ok(())
    }

    /// Collects the role names of `user_id` and every policy attached to them.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - User missing or deleted
    pub async fn user_permissions(&self, user_id: Uuid) -> Result<UserPermissions, AppError> {
        if UserRepository::new(self.db).find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found(format!("user {} not found", user_id)));
        }

        let roles: Vec<String> = RoleRepository::new(self.db)
            .get_by_user(user_id)
            .await?
            .into_iter()
            .map(|role| role.name)
            .collect();
        let permissions = RbacRepository::new(self.db).get_for_subjects(&roles).await?;

        Ok(UserPermissions {
            user_id,
            roles,
            permissions,
        })
    }

    /// Whether any role of `user_id` grants `action` on `object`.
    pub async fn check(&self, user_id: Uuid, object: &str, action: &str) -> Result<bool, AppError> {
        Ok(self.user_permissions(user_id).await?.allows(object, action))
    }

    /// Fails with `AuthError::AccessDenied` unless the user holds the permission.
    pub async fn enforce(&self, user_id: Uuid, object: &str, action: Action) -> Result<(), AppError> {
        if self.check(user_id, object, action.as_str()).await? {
            return Ok(());
        }

        Err(AuthError::AccessDenied {
            user_id,
            object: object.to_string(),
            action: action.to_string(),
        }
        .into())
    }

    /// Whether the `(admin, *, *)` policy is present.
    pub async fn admin_policy_present(&self) -> Result<bool, AppError> {
        Ok(RbacRepository::new(self.db)
            .exists(&Policy {
                subject: ADMIN_ROLE.to_string(),
                object: WILDCARD.to_string(),
                action: WILDCARD.to_string(),
            })
            .await?)
    }
}
