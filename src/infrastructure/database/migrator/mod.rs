//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users;
mod m20250101_000002_create_user_activities;
mod m20250101_000003_create_catalog;
mod m20250101_000004_create_orders;
mod m20250101_000005_create_engagement_logs;
mod m20250101_000006_create_requests;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users::Migration),
            Box::new(m20250101_000002_create_user_activities::Migration),
            Box::new(m20250101_000003_create_catalog::Migration),
            Box::new(m20250101_000004_create_orders::Migration),
            Box::new(m20250101_000005_create_engagement_logs::Migration),
            Box::new(m20250101_000006_create_requests::Migration),
        ]
    }
}
