//! Platform adapters - translate each external platform API into the
//! common `PlatformData` shape. No persistence happens here; upstream
//! failures are absorbed, logged and turned into absent or degraded
//! results instead of crossing this boundary.

pub mod codeforces;
pub mod geeksforgeeks;
pub mod leetcode;

use crate::{
  entity::Platform,
  model::{DailyCount, PlatformData, Sourced},
  prelude::*,
};

// TODO: configure user agent
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/91.0.4472.124 Safari/537.36";

pub struct Fetcher {
  http: reqwest::Client,
}

impl Fetcher {
  pub fn new() -> Self {
    let http = reqwest::Client::builder()
      .user_agent(USER_AGENT)
      .timeout(Duration::from_secs(15))
      .build()
      .expect("Failed to build HTTP client");

    Self { http }
  }

  /// Existence probe for an external account.
  pub async fn check_username(
    &self,
    platform: Platform,
    username: &str,
  ) -> bool {
    match platform {
      Platform::Leetcode => {
        leetcode::check_username(&self.http, username).await
      }
      Platform::GeeksForGeeks => {
        geeksforgeeks::check_username(&self.http, username).await
      }
      Platform::CodeForces => {
        codeforces::check_username(&self.http, username).await
      }
    }
  }

  /// Fetches the full snapshot of one platform's data. `None` means the
  /// account does not exist upstream, or the upstream gave nothing usable.
  pub async fn fetch(
    &self,
    platform: Platform,
    username: &str,
  ) -> Option<Sourced<PlatformData>> {
    match platform {
      Platform::Leetcode => leetcode::fetch(&self.http, username).await,
      Platform::GeeksForGeeks => {
        geeksforgeeks::fetch(&self.http, username).await
      }
      Platform::CodeForces => codeforces::fetch(&self.http, username).await,
    }
  }
}

impl Default for Fetcher {
  fn default() -> Self {
    Self::new()
  }
}

/// Maps day-bucketed counts onto the fixed 31-day window, zero-filling
/// days without activity. The window length is load-bearing for the
/// activity chart.
pub(crate) fn window_from_daily(
  counts: &HashMap<Date, i64>,
  today: Date,
) -> Vec<DailyCount> {
  utils::submission_window(today)
    .into_iter()
    .map(|date| DailyCount {
      date,
      count: counts.get(&date).copied().unwrap_or(0) as i32,
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn window_is_zero_filled() {
    let today = Date::from_ymd_opt(2026, 3, 12).unwrap();
    let window = window_from_daily(&HashMap::new(), today);

    assert_eq!(window.len(), 31);
    assert!(window.iter().all(|day| day.count == 0));
  }

  #[test]
  fn window_picks_up_bucketed_counts() {
    let today = Date::from_ymd_opt(2026, 3, 12).unwrap();
    let mut counts = HashMap::new();
    counts.insert(today, 4);
    counts.insert(today - TimeDelta::days(3), 2);
    // outside the window, must be ignored
    counts.insert(today - TimeDelta::days(31), 9);

    let window = window_from_daily(&counts, today);

    assert_eq!(window.len(), 31);
    assert_eq!(window.last().unwrap().count, 4);
    assert_eq!(window[27].count, 2);
    assert_eq!(window.iter().map(|day| day.count).sum::<i32>(), 6);
  }
}
