use sea_orm_migration::prelude::*;

use super::m20260312_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(SubmissionStats::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(SubmissionStats::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(SubmissionStats::UserId).integer().not_null())
          .col(ColumnDef::new(SubmissionStats::Platform).string().not_null())
          .col(ColumnDef::new(SubmissionStats::Date).date().not_null())
          .col(ColumnDef::new(SubmissionStats::Count).integer().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_submission_stats_user")
              .from(SubmissionStats::Table, SubmissionStats::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    // one row per day of the window
    manager
      .create_index(
        Index::create()
          .name("idx_submission_stats_unique")
          .table(SubmissionStats::Table)
          .col(SubmissionStats::UserId)
          .col(SubmissionStats::Platform)
          .col(SubmissionStats::Date)
          .unique()
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(SubmissionStats::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum SubmissionStats {
  Table,
  Id,
  UserId,
  Platform,
  Date,
  Count,
}
