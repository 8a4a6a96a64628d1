//! Platform connection entity - one row per linked external account

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The external competitive-programming platforms this server understands.
/// Adding a platform means adding a variant here plus one adapter module.
#[derive(
  Copy,
  Clone,
  Debug,
  PartialEq,
  Eq,
  Hash,
  EnumIter,
  DeriveActiveEnum,
  Serialize,
  Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Platform {
  #[sea_orm(string_value = "leetcode")]
  Leetcode,
  #[sea_orm(string_value = "geeksforgeeks")]
  GeeksForGeeks,
  #[sea_orm(string_value = "codeforces")]
  CodeForces,
}

impl Platform {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Leetcode => "leetcode",
      Self::GeeksForGeeks => "geeksforgeeks",
      Self::CodeForces => "codeforces",
    }
  }

  pub fn parse(value: &str) -> Option<Self> {
    match value {
      "leetcode" => Some(Self::Leetcode),
      "geeksforgeeks" => Some(Self::GeeksForGeeks),
      "codeforces" => Some(Self::CodeForces),
      _ => None,
    }
  }
}

impl std::fmt::Display for Platform {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_platforms")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub user_id: i32,
  pub platform: Platform,
  pub username: String,
  pub is_active: bool,
  pub created_at: DateTime,
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
