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
          .table(ContestHistory::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(ContestHistory::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(ContestHistory::UserId).integer().not_null())
          .col(ColumnDef::new(ContestHistory::Platform).string().not_null())
          .col(ColumnDef::new(ContestHistory::Name).string().not_null())
          .col(ColumnDef::new(ContestHistory::Ranking).string().not_null())
          .col(ColumnDef::new(ContestHistory::Score).integer().not_null())
          .col(ColumnDef::new(ContestHistory::Date).date().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_contest_history_user")
              .from(ContestHistory::Table, ContestHistory::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_contest_history_user")
          .table(ContestHistory::Table)
          .col(ContestHistory::UserId)
          .col(ContestHistory::Platform)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(ContestHistory::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum ContestHistory {
  Table,
  Id,
  UserId,
  Platform,
  Name,
  Ranking,
  Score,
  Date,
}
