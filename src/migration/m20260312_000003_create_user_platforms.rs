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
          .table(UserPlatforms::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(UserPlatforms::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(UserPlatforms::UserId).integer().not_null())
          .col(ColumnDef::new(UserPlatforms::Platform).string().not_null())
          .col(ColumnDef::new(UserPlatforms::Username).string().not_null())
          .col(
            ColumnDef::new(UserPlatforms::IsActive)
              .boolean()
              .not_null()
              .default(true),
          )
          .col(ColumnDef::new(UserPlatforms::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_user_platforms_user")
              .from(UserPlatforms::Table, UserPlatforms::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    // one connection per platform per user
    manager
      .create_index(
        Index::create()
          .name("idx_user_platforms_unique")
          .table(UserPlatforms::Table)
          .col(UserPlatforms::UserId)
          .col(UserPlatforms::Platform)
          .unique()
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(UserPlatforms::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum UserPlatforms {
  Table,
  Id,
  UserId,
  Platform,
  Username,
  IsActive,
  CreatedAt,
}
