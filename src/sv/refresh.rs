//! Refresh service - orchestrates one platform's full data refresh
//!
//! The profile is the mandatory anchor: if the adapter yields no
//! snapshot, the refresh fails and nothing is written. The facets are
//! persisted one transaction each; there is no cross-facet rollback, so
//! a failure mid-way leaves earlier facets already refreshed.

use crate::{
  entity::Platform,
  model::PlatformData,
  platforms::Fetcher,
  prelude::*,
  sv::{Platforms, Stats},
};

pub struct Refresh<'a> {
  db: &'a DatabaseConnection,
  fetcher: &'a Fetcher,
}

impl<'a> Refresh<'a> {
  pub fn new(db: &'a DatabaseConnection, fetcher: &'a Fetcher) -> Self {
    Self { db, fetcher }
  }

  /// Refreshes an already-connected platform.
  pub async fn run(
    &self,
    user_id: i32,
    kind: Platform,
  ) -> Result<(PlatformData, Option<String>)> {
    let connection = Platforms::new(self.db)
      .get(user_id, kind)
      .await?
      .ok_or(Error::PlatformNotConnected)?;

    self.run_for(user_id, kind, &connection.username).await
  }

  /// Refreshes with a known external username (used right after
  /// connecting, before the connection row is re-read).
  pub async fn run_for(
    &self,
    user_id: i32,
    kind: Platform,
    username: &str,
  ) -> Result<(PlatformData, Option<String>)> {
    let snapshot = self
      .fetcher
      .fetch(kind, username)
      .await
      .ok_or(Error::PlatformUnavailable)?;

    let (data, stale_reason) = snapshot.into_parts();
    let Some(profile) = &data.profile else {
      return Err(Error::PlatformUnavailable);
    };

    let stats = Stats::new(self.db);
    stats.upsert_profile(user_id, kind, profile).await?;
    stats.replace_submissions(user_id, kind, &data.submissions).await?;
    stats.replace_languages(user_id, kind, &data.languages).await?;
    stats.replace_badges(user_id, kind, &data.badges).await?;
    stats.replace_contests(user_id, kind, &data.contests).await?;

    if let Some(reason) = &stale_reason {
      warn!("refresh of {kind} for user {user_id} used degraded data: {reason}");
    } else {
      debug!("refreshed {kind} for user {user_id} as `{username}`");
    }

    Ok((data, stale_reason))
  }
}
