//! Role, role assignment and RBAC policy factories.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Creates a role with a unique default name of `"role_{id}"`.
pub async fn create_role(db: &DatabaseConnection) -> Result<entity::role::Model, DbErr> {
    create_role_named(db, &format!("role_{}", next_id())).await
}

/// Creates a role with the given name.
///
/// # Arguments
/// - `db` - Database connection
/// - `name` - Unique role name
///
/// # Returns
/// - `Ok(entity::role::Model)` - Created role
/// - `Err(DbErr)` - Database error, including a unique violation on the name
pub async fn create_role_named(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entity::role::Model, DbErr> {
    let now = Utc::now();
    entity::role::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        name: ActiveValue::Set(name.to_string()),
        description: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}

/// Assigns a role to a user.
pub async fn assign_role(
    db: &DatabaseConnection,
    user_id: Uuid,
    role_id: Uuid,
) -> Result<entity::user_role::Model, DbErr> {
    entity::user_role::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        role_id: ActiveValue::Set(role_id),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

/// Creates an RBAC policy rule granting `subject` the `action` on `object`.
///
/// `subject` is a role name; `object` and `action` may be `"*"`.
pub async fn create_policy(
    db: &DatabaseConnection,
    subject: &str,
    object: &str,
    action: &str,
) -> Result<entity::rbac_policy::Model, DbErr> {
    entity::rbac_policy::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        subject: ActiveValue::Set(subject.to_string()),
        object: ActiveValue::Set(object.to_string()),
        action: ActiveValue::Set(action.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
