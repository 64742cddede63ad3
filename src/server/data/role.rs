//! Role and role-assignment repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    TransactionTrait,
};
use uuid::Uuid;

use crate::server::model::role::{CreateRoleParams, Role, UpdateRoleParams};

pub struct RoleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateRoleParams) -> Result<Role, DbErr> {
        let now = Utc::now();
        let entity = entity::role::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Role::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DbErr> {
        Ok(entity::prelude::Role::find_by_id(id)
            .one(self.db)
            .await?
            .map(Role::from_entity))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DbErr> {
        Ok(entity::prelude::Role::find()
            .filter(entity::role::Column::Name.eq(name))
            .one(self.db)
            .await?
            .map(Role::from_entity))
    }

    /// All roles ordered by name.
    pub async fn get_all(&self) -> Result<Vec<Role>, DbErr> {
        Ok(entity::prelude::Role::find()
            .order_by_asc(entity::role::Column::Name)
            .all(self.db)
            .await?
            .into_iter()
            .map(Role::from_entity)
            .collect())
    }

    pub async fn update(&self, id: Uuid, params: UpdateRoleParams) -> Result<Option<Role>, DbErr> {
        let Some(existing) = entity::prelude::Role::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::role::ActiveModel = existing.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Role::from_entity(active.update(self.db).await?)))
    }

    /// Deletes a role along with its assignments and the policies naming it as subject.
    ///
    /// # Returns
    /// - `Ok(true)` - Role deleted
    /// - `Ok(false)` - Role not found
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        let Some(role) = entity::prelude::Role::find_by_id(id).one(&txn).await? else {
            return Ok(false);
        };

        entity::prelude::UserRole::delete_many()
            .filter(entity::user_role::Column::RoleId.eq(id))
            .exec(&txn)
            .await?;
        entity::prelude::RbacPolicy::delete_many()
            .filter(entity::rbac_policy::Column::Subject.eq(role.name))
            .exec(&txn)
            .await?;
        entity::prelude::Role::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        Ok(true)
    }

    /// Roles assigned to a user, ordered by name.
    pub async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<Role>, DbErr> {
        Ok(entity::prelude::Role::find()
            .join(JoinType::InnerJoin, entity::role::Relation::UserRole.def())
            .filter(entity::user_role::Column::UserId.eq(user_id))
            .order_by_asc(entity::role::Column::Name)
            .all(self.db)
            .await?
            .into_iter()
            .map(Role::from_entity)
            .collect())
    }

    /// Assigns a role to a user. Assigning an existing pair is a no-op.
    ///
    /// # Returns
    /// - `Ok(true)` - Assignment created
    /// - `Ok(false)` - The user already had the role
    pub async fn assign(&self, user_id: Uuid, role_id: Uuid) -> Result<bool, DbErr> {
        let exists = entity::prelude::UserRole::find_by_id((user_id, role_id))
            .one(self.db)
            .await?
            .is_some();
        if exists {
            return Ok(false);
        }

        entity::user_role::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            role_id: ActiveValue::Set(role_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }

    /// Removes a role from a user.
    ///
    /// # Returns
    /// - `Ok(true)` - Assignment removed
    /// - `Ok(false)` - The user did not have the role
    pub async fn unassign(&self, user_id: Uuid, role_id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::UserRole::delete_by_id((user_id, role_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_users_with_role(&self, role_id: Uuid) -> Result<u64, DbErr> {
        entity::prelude::UserRole::find()
            .filter(entity::user_role::Column::RoleId.eq(role_id))
            .count(self.db)
            .await
    }
}
