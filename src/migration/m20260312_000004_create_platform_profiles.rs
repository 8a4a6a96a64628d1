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
          .table(PlatformProfiles::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(PlatformProfiles::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(PlatformProfiles::UserId).integer().not_null())
          .col(ColumnDef::new(PlatformProfiles::Platform).string().not_null())
          .col(ColumnDef::new(PlatformProfiles::TotalSolved).integer().null())
          .col(ColumnDef::new(PlatformProfiles::EasySolved).integer().null())
          .col(ColumnDef::new(PlatformProfiles::MediumSolved).integer().null())
          .col(ColumnDef::new(PlatformProfiles::HardSolved).integer().null())
          .col(
            ColumnDef::new(PlatformProfiles::TotalSubmissions).integer().null(),
          )
          .col(
            ColumnDef::new(PlatformProfiles::AcceptanceRate).string().null(),
          )
          .col(ColumnDef::new(PlatformProfiles::Ranking).string().null())
          .col(
            ColumnDef::new(PlatformProfiles::ContestAttended).integer().null(),
          )
          .col(ColumnDef::new(PlatformProfiles::Additional).json().null())
          .col(
            ColumnDef::new(PlatformProfiles::LastUpdated)
              .date_time()
              .not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_platform_profiles_user")
              .from(PlatformProfiles::Table, PlatformProfiles::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_platform_profiles_unique")
          .table(PlatformProfiles::Table)
          .col(PlatformProfiles::UserId)
          .col(PlatformProfiles::Platform)
          .unique()
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(PlatformProfiles::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum PlatformProfiles {
  Table,
  Id,
  UserId,
  Platform,
  TotalSolved,
  EasySolved,
  MediumSolved,
  HardSolved,
  TotalSubmissions,
  AcceptanceRate,
  Ranking,
  ContestAttended,
  Additional,
  LastUpdated,
}
