pub use sea_orm_migration::prelude::*;

mod m20260901_000001_create_user_table;
mod m20260901_000002_create_role_table;
mod m20260901_000003_create_user_role_table;
mod m20260901_000004_create_rbac_policy_table;
mod m20260902_000005_create_organization_table;
mod m20260902_000006_create_menu_table;
mod m20260902_000007_create_taxonomy_table;
mod m20260903_000008_create_post_table;
mod m20260903_000009_create_tag_table;
mod m20260903_000010_create_post_tag_table;
mod m20260903_000011_create_comment_table;
mod m20260904_000012_create_address_table;
mod m20260904_000013_create_media_table;
mod m20260904_000014_create_notification_table;
mod m20260905_000015_create_job_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000001_create_user_table::Migration),
            Box::new(m20260901_000002_create_role_table::Migration),
            Box::new(m20260901_000003_create_user_role_table::Migration),
            Box::new(m20260901_000004_create_rbac_policy_table::Migration),
            Box::new(m20260902_000005_create_organization_table::Migration),
            Box::new(m20260902_000006_create_menu_table::Migration),
            Box::new(m20260902_000007_create_taxonomy_table::Migration),
            Box::new(m20260903_000008_create_post_table::Migration),
            Box::new(m20260903_000009_create_tag_table::Migration),
            Box::new(m20260903_000010_create_post_tag_table::Migration),
            Box::new(m20260903_000011_create_comment_table::Migration),
            Box::new(m20260904_000012_create_address_table::Migration),
            Box::new(m20260904_000013_create_media_table::Migration),
            Box::new(m20260904_000014_create_notification_table::Migration),
            Box::new(m20260905_000015_create_job_table::Migration),
        ]
    }
}
