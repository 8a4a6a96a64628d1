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
          .table(Badges::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Badges::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Badges::UserId).integer().not_null())
          .col(ColumnDef::new(Badges::Platform).string().not_null())
          .col(ColumnDef::new(Badges::Name).string().not_null())
          .col(ColumnDef::new(Badges::Description).string().not_null())
          .col(ColumnDef::new(Badges::Icon).string().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_badges_user")
              .from(Badges::Table, Badges::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_badges_user")
          .table(Badges::Table)
          .col(Badges::UserId)
          .col(Badges::Platform)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Badges::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Badges {
  Table,
  Id,
  UserId,
  Platform,
  Name,
  Description,
  Icon,
}
