//! Database migrations using SeaORM

use sea_orm_migration::prelude::*;

mod m20260312_000001_create_users;
mod m20260312_000002_create_sessions;
mod m20260312_000003_create_user_platforms;
mod m20260312_000004_create_platform_profiles;
mod m20260312_000005_create_submission_stats;
mod m20260312_000006_create_language_stats;
mod m20260312_000007_create_badges;
mod m20260312_000008_create_contest_history;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260312_000001_create_users::Migration),
      Box::new(m20260312_000002_create_sessions::Migration),
      Box::new(m20260312_000003_create_user_platforms::Migration),
      Box::new(m20260312_000004_create_platform_profiles::Migration),
      Box::new(m20260312_000005_create_submission_stats::Migration),
      Box::new(m20260312_000006_create_language_stats::Migration),
      Box::new(m20260312_000007_create_badges::Migration),
      Box::new(m20260312_000008_create_contest_history::Migration),
    ]
  }
}
