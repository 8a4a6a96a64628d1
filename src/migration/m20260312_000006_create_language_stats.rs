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
          .table(LanguageStats::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(LanguageStats::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(LanguageStats::UserId).integer().not_null())
          .col(ColumnDef::new(LanguageStats::Platform).string().not_null())
          .col(ColumnDef::new(LanguageStats::Language).string().not_null())
          .col(ColumnDef::new(LanguageStats::Count).integer().not_null())
          .col(ColumnDef::new(LanguageStats::Percentage).string().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_language_stats_user")
              .from(LanguageStats::Table, LanguageStats::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_language_stats_user")
          .table(LanguageStats::Table)
          .col(LanguageStats::UserId)
          .col(LanguageStats::Platform)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(LanguageStats::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum LanguageStats {
  Table,
  Id,
  UserId,
  Platform,
  Language,
  Count,
  Percentage,
}
