//! Persistence for `(subject, object, action)` policy rules.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::rbac::Policy;

pub struct RbacRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RbacRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// All policies ordered by subject, object, action.
    pub async fn get_all(&self) -> Result<Vec<Policy>, DbErr> {
        Ok(entity::prelude::RbacPolicy::find()
            .order_by_asc(entity::rbac_policy::Column::Subject)
            .order_by_asc(entity::rbac_policy::Column::Object)
            .order_by_asc(entity::rbac_policy::Column::Action)
            .all(self.db)
            .await?
            .into_iter()
            .map(Policy::from_entity)
            .collect())
    }

    /// Policies whose subject is one of `subjects`.
    pub async fn get_for_subjects(&self, subjects: &[String]) -> Result<Vec<Policy>, DbErr> {
        if subjects.is_empty() {
            return Ok(Vec::new());
        }

        Ok(entity::prelude::RbacPolicy::find()
            .filter(entity::rbac_policy::Column::Subject.is_in(subjects.iter().cloned()))
            .order_by_asc(entity::rbac_policy::Column::Object)
            .order_by_asc(entity::rbac_policy::Column::Action)
            .all(self.db)
            .await?
            .into_iter()
            .map(Policy::from_entity)
            .collect())
    }

    pub async fn exists(&self, policy: &Policy) -> Result<bool, DbErr> {
        let count = entity::prelude::RbacPolicy::find()
            .filter(entity::rbac_policy::Column::Subject.eq(&policy.subject))
            .filter(entity::rbac_policy::Column::Object.eq(&policy.object))
            .filter(entity::rbac_policy::Column::Action.eq(&policy.action))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Adds a policy unless an identical one exists.
    ///
    /// # Returns
    /// - `Ok(true)` - Policy inserted
    /// - `Ok(false)` - Identical policy already present
    pub async fn add(&self, policy: Policy) -> Result<bool, DbErr> {
        if self.exists(&policy).await? {
            return Ok(false);
        }

        entity::rbac_policy::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            subject: ActiveValue::Set(policy.subject),
            object: ActiveValue::Set(policy.object),
            action: ActiveValue::Set(policy.action),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }

    /// # Returns
    /// - `Ok(true)` - Policy removed
    /// - `Ok(false)` - No such policy
    pub async fn remove(&self, policy: &Policy) -> Result<bool, DbErr> {
        let result = entity::prelude::RbacPolicy::delete_many()
            .filter(entity::rbac_policy::Column::Subject.eq(&policy.subject))
            .filter(entity::rbac_policy::Column::Object.eq(&policy.object))
            .filter(entity::rbac_policy::Column::Action.eq(&policy.action))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
