//! CodeForces adapter - official REST API
//!
//! CodeForces wraps every payload in `{status, result}` and reports
//! failures with `status != "OK"` (often alongside an HTTP 400), so
//! responses are parsed before any status-code check.

use reqwest::Client;
use serde::Deserialize;

use crate::{
  entity::Platform,
  model::{
    BadgeSpec, ContestEntry, LanguageShare, PlatformData, ProfileFacet,
    Sourced,
  },
  platforms::window_from_daily,
  prelude::*,
};

const API_URL: &str = "https://codeforces.com/api";

/// How many recent submissions to pull; feeds both the activity window
/// and the language histogram in a single round trip.
const SUBMISSION_SAMPLE: u32 = 500;

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
  status: String,
  #[serde(default)]
  result: Option<T>,
}

/// `status != "OK"` means "no usable result", not an error to raise.
fn unwrap_ok<T>(response: ApiResponse<T>) -> Option<T> {
  (response.status == "OK").then_some(response.result).flatten()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
  handle: String,
  #[serde(default)]
  rating: Option<i64>,
  #[serde(default)]
  max_rating: Option<i64>,
  #[serde(default)]
  rank: Option<String>,
  #[serde(default)]
  max_rank: Option<String>,
  #[serde(default)]
  contribution: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Submission {
  creation_time_seconds: i64,
  #[serde(default)]
  programming_language: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RatingChange {
  contest_name: String,
  rank: i64,
  old_rating: i64,
  new_rating: i64,
  rating_update_time_seconds: i64,
}

pub(super) async fn check_username(http: &Client, handle: &str) -> bool {
  match query_user(http, handle).await {
    Ok(user) => user.is_some(),
    Err(err) => {
      error!("CodeForces handle check failed: {err:#}");
      false
    }
  }
}

pub(super) async fn fetch(
  http: &Client,
  handle: &str,
) -> Option<Sourced<PlatformData>> {
  let user = match query_user(http, handle).await {
    Ok(Some(user)) => user,
    Ok(None) => return None,
    Err(err) => {
      error!("CodeForces profile fetch failed for `{handle}`: {err:#}");
      return None;
    }
  };

  let submissions = match query_submissions(http, handle).await {
    Ok(submissions) => submissions,
    Err(err) => {
      warn!("CodeForces submission fetch failed for `{handle}`: {err:#}");
      Vec::new()
    }
  };

  let contests = match query_rating(http, handle).await {
    Ok(changes) => contest_entries(changes),
    Err(err) => {
      warn!("CodeForces rating fetch failed for `{handle}`: {err:#}");
      Vec::new()
    }
  };

  let window =
    window_from_daily(&daily_counts(&submissions), utils::today());
  let languages = language_shares(&submissions);
  let badges = badges_for(&user);

  let data = PlatformData {
    platform: Platform::CodeForces,
    username: user.handle.clone(),
    profile: Some(ProfileFacet {
      total_submissions: Some(submissions.len() as i32),
      ranking: user.rank.clone(),
      contest_attended: Some(contests.len() as i32),
      additional: Some(json::json!({
        "rating": user.rating,
        "maxRating": user.max_rating,
        "maxRank": user.max_rank,
        "contribution": user.contribution,
      })),
      ..Default::default()
    }),
    submissions: window,
    languages,
    badges,
    contests,
  };

  Some(Sourced::Fresh(data))
}

async fn query_user(
  http: &Client,
  handle: &str,
) -> anyhow::Result<Option<User>> {
  let url = format!("{API_URL}/user.info?handles={handle}");
  let response: ApiResponse<Vec<User>> =
    http.get(&url).send().await?.json().await?;

  Ok(unwrap_ok(response).and_then(|mut users| {
    if users.is_empty() { None } else { Some(users.remove(0)) }
  }))
}

async fn query_submissions(
  http: &Client,
  handle: &str,
) -> anyhow::Result<Vec<Submission>> {
  let url = format!(
    "{API_URL}/user.status?handle={handle}&from=1&count={SUBMISSION_SAMPLE}"
  );
  let response: ApiResponse<Vec<Submission>> =
    http.get(&url).send().await?.json().await?;

  Ok(unwrap_ok(response).unwrap_or_default())
}

async fn query_rating(
  http: &Client,
  handle: &str,
) -> anyhow::Result<Vec<RatingChange>> {
  let url = format!("{API_URL}/user.rating?handle={handle}");
  let response: ApiResponse<Vec<RatingChange>> =
    http.get(&url).send().await?.json().await?;

  Ok(unwrap_ok(response).unwrap_or_default())
}

fn daily_counts(submissions: &[Submission]) -> HashMap<Date, i64> {
  let mut counts = HashMap::new();
  for submission in submissions {
    if let Some(moment) =
      Utc.timestamp_opt(submission.creation_time_seconds, 0).single()
    {
      *counts.entry(moment.date_naive()).or_insert(0) += 1;
    }
  }
  counts
}

fn language_shares(submissions: &[Submission]) -> Vec<LanguageShare> {
  let mut counts: HashMap<&str, i64> = HashMap::new();
  for submission in submissions {
    if let Some(language) = &submission.programming_language {
      *counts.entry(language).or_insert(0) += 1;
    }
  }

  let total: i64 = counts.values().sum();
  let mut shares: Vec<_> = counts
    .into_iter()
    .map(|(language, count)| LanguageShare {
      language: language.to_string(),
      count: count as i32,
      percentage: utils::percentage(count, total),
    })
    .collect();

  shares.sort_by(|a, b| b.count.cmp(&a.count));
  shares
}

/// Rating changes arrive oldest first; the dashboard shows the most
/// recent ten.
fn contest_entries(changes: Vec<RatingChange>) -> Vec<ContestEntry> {
  changes
    .into_iter()
    .rev()
    .take(10)
    .filter_map(|change| {
      let moment =
        Utc.timestamp_opt(change.rating_update_time_seconds, 0).single()?;
      Some(ContestEntry {
        name: change.contest_name,
        ranking: change.rank.to_string(),
        score: (change.new_rating - change.old_rating) as i32,
        date: moment.date_naive(),
      })
    })
    .collect()
}

fn badges_for(user: &User) -> Vec<BadgeSpec> {
  let mut badges = Vec::new();

  let badge = |name: &str, description: &str, icon: &str| BadgeSpec {
    name: name.to_string(),
    description: description.to_string(),
    icon: icon.to_string(),
  };

  match user.rating.unwrap_or(0) {
    rating if rating >= 2400 => badges.push(badge(
      "Grandmaster",
      "Achieved Grandmaster rating on CodeForces",
      "award",
    )),
    rating if rating >= 2100 => badges.push(badge(
      "Master",
      "Achieved Master rating on CodeForces",
      "star",
    )),
    rating if rating >= 1900 => badges.push(badge(
      "Candidate Master",
      "Achieved Candidate Master rating on CodeForces",
      "star-half",
    )),
    rating if rating >= 1600 => badges.push(badge(
      "Expert",
      "Achieved Expert rating on CodeForces",
      "thumbs-up",
    )),
    _ => {}
  }

  if user.contribution.unwrap_or(0) > 0 {
    badges.push(badge(
      "Contributor",
      "Made positive contributions to CodeForces community",
      "users",
    ));
  }

  if badges.is_empty() {
    badges.push(badge(
      "CodeForces Participant",
      "Active participant on CodeForces",
      "code",
    ));
  }

  badges
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn failed_status_yields_no_result() {
    let response: ApiResponse<Vec<User>> = json::from_str(
      r#"{"status": "FAILED", "comment": "handles: User not found"}"#,
    )
    .unwrap();

    assert!(unwrap_ok(response).is_none());
  }

  #[test]
  fn ok_status_unwraps_result() {
    let response: ApiResponse<Vec<User>> = json::from_str(
      r#"{"status": "OK", "result": [{"handle": "tourist", "rating": 3800}]}"#,
    )
    .unwrap();

    let users = unwrap_ok(response).unwrap();
    assert_eq!(users[0].handle, "tourist");
  }

  #[test]
  fn languages_histogram_from_submissions() {
    let submissions: Vec<Submission> = (0..3)
      .map(|i| Submission {
        creation_time_seconds: 1_773_187_200 + i * 60,
        programming_language: Some("GNU C++17".to_string()),
      })
      .chain(std::iter::once(Submission {
        creation_time_seconds: 1_773_187_200,
        programming_language: Some("Rust 2021".to_string()),
      }))
      .collect();

    let shares = language_shares(&submissions);

    assert_eq!(shares.len(), 2);
    assert_eq!(shares[0].language, "GNU C++17");
    assert_eq!(shares[0].count, 3);
    assert_eq!(shares[0].percentage, "75.0%");
    assert_eq!(shares[1].percentage, "25.0%");
  }

  #[test]
  fn daily_counts_bucket_by_day() {
    let submissions = vec![
      Submission {
        creation_time_seconds: 1_773_187_200, // 2026-03-11 00:00 UTC
        programming_language: None,
      },
      Submission {
        creation_time_seconds: 1_773_230_400, // same day, noon
        programming_language: None,
      },
    ];

    let counts = daily_counts(&submissions);
    let day = Date::from_ymd_opt(2026, 3, 11).unwrap();

    assert_eq!(counts.get(&day), Some(&2));
    assert_eq!(counts.len(), 1);
  }

  #[test]
  fn contests_are_newest_first_capped_at_ten() {
    let changes: Vec<_> = (0..12)
      .map(|i| RatingChange {
        contest_name: format!("Round {i}"),
        rank: 100 + i,
        old_rating: 1500,
        new_rating: 1500 + i,
        rating_update_time_seconds: 1_773_187_200 + i * 86_400,
      })
      .collect();

    let entries = contest_entries(changes);

    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0].name, "Round 11");
    assert_eq!(entries[0].score, 11);
    assert_eq!(entries[9].name, "Round 2");
  }

  #[test]
  fn rating_ladder_badges() {
    let user = |rating| User {
      handle: "x".to_string(),
      rating: Some(rating),
      max_rating: Some(rating),
      rank: None,
      max_rank: None,
      contribution: Some(0),
    };

    assert_eq!(badges_for(&user(2500))[0].name, "Grandmaster");
    assert_eq!(badges_for(&user(2200))[0].name, "Master");
    assert_eq!(badges_for(&user(1950))[0].name, "Candidate Master");
    assert_eq!(badges_for(&user(1700))[0].name, "Expert");
    assert_eq!(badges_for(&user(1200))[0].name, "CodeForces Participant");
  }
}
