//! Platform profile entity - latest aggregate stats snapshot per
//! (user, platform), upserted on every refresh

use json::Value;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Platform;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "platform_profiles")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub user_id: i32,
  pub platform: Platform,
  pub total_solved: Option<i32>,
  pub easy_solved: Option<i32>,
  pub medium_solved: Option<i32>,
  pub hard_solved: Option<i32>,
  pub total_submissions: Option<i32>,
  pub acceptance_rate: Option<String>,
  pub ranking: Option<String>,
  pub contest_attended: Option<i32>,
  /// platform-specific extras (ratings, institute names, question totals)
  pub additional: Option<Value>,
  pub last_updated: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::UserId",
    to = "super::user::Column::Id"
  )]
  User,
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::User.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
