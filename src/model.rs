//! Common data shapes shared by the platform adapters, the services and
//! the HTTP layer.

use json::Value;
use serde::{Deserialize, Serialize};

use crate::{
  entity::{Platform, user},
  prelude::*,
};

/// Freshness tag for adapter results.
///
/// `Stale` carries data that was synthesized or substituted while the
/// upstream platform was degraded (rate limited or unreachable), together
/// with the reason. Callers can therefore distinguish degraded snapshots
/// from real ones instead of treating every result as fresh.
#[derive(Debug, Clone)]
pub enum Sourced<T> {
  Fresh(T),
  Stale(T, String),
}

impl<T> Sourced<T> {
  pub fn into_parts(self) -> (T, Option<String>) {
    match self {
      Sourced::Fresh(data) => (data, None),
      Sourced::Stale(data, reason) => (data, Some(reason)),
    }
  }
}

/// Aggregate profile stats for one (user, platform). Every field is
/// optional: each platform supplies a different subset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFacet {
  pub total_solved: Option<i32>,
  pub easy_solved: Option<i32>,
  pub medium_solved: Option<i32>,
  pub hard_solved: Option<i32>,
  pub total_submissions: Option<i32>,
  pub acceptance_rate: Option<String>,
  pub ranking: Option<String>,
  pub contest_attended: Option<i32>,
  #[serde(rename = "additionalData")]
  pub additional: Option<Value>,
}

/// One day of the 31-day submission window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
  pub date: Date,
  pub count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageShare {
  pub language: String,
  pub count: i32,
  pub percentage: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeSpec {
  pub name: String,
  pub description: String,
  pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestEntry {
  #[serde(rename = "contestName")]
  pub name: String,
  pub ranking: String,
  pub score: i32,
  pub date: Date,
}

/// The full snapshot of one platform's data for one user, as produced by
/// an adapter or assembled from storage for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformData {
  #[serde(rename = "platformType")]
  pub platform: Platform,
  pub username: String,
  /// `None` only when reading a connection that has never been refreshed.
  pub profile: Option<ProfileFacet>,
  #[serde(rename = "submissionStats")]
  pub submissions: Vec<DailyCount>,
  #[serde(rename = "languageStats")]
  pub languages: Vec<LanguageShare>,
  pub badges: Vec<BadgeSpec>,
  #[serde(rename = "contestHistory")]
  pub contests: Vec<ContestEntry>,
}

/// User fields safe to put on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
  pub id: i32,
  pub username: String,
  pub email: String,
  pub full_name: Option<String>,
}

impl From<user::Model> for PublicUser {
  fn from(user: user::Model) -> Self {
    Self {
      id: user.id,
      username: user.username,
      email: user.email,
      full_name: user.full_name,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSummary {
  pub platform_type: Platform,
  pub username: String,
  pub is_active: bool,
}

/// The dashboard payload: the user plus everything stored per platform.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithStats {
  pub id: i32,
  pub username: String,
  pub email: String,
  pub full_name: Option<String>,
  pub platforms: Vec<PlatformSummary>,
  pub platform_data: Vec<PlatformData>,
}
