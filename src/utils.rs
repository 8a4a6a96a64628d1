use crate::prelude::*;

/// Formats `count` as a share of `total` with one decimal, e.g. "40.0%".
pub fn percentage(count: i64, total: i64) -> String {
  if total <= 0 {
    return "0%".to_string();
  }
  format!("{:.1}%", count as f64 / total as f64 * 100.0)
}

/// The window rendered by the activity chart: today and the 30 preceding
/// days, oldest first. Always 31 entries.
pub fn submission_window(today: Date) -> Vec<Date> {
  (0..=30).rev().map(|back| today - TimeDelta::days(back)).collect()
}

pub fn today() -> Date {
  Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn percentage_rounds_to_one_decimal() {
    assert_eq!(percentage(12, 30), "40.0%");
    assert_eq!(percentage(8, 30), "26.7%");
    assert_eq!(percentage(1, 3), "33.3%");
    assert_eq!(percentage(30, 30), "100.0%");
  }

  #[test]
  fn percentage_of_empty_total() {
    assert_eq!(percentage(0, 0), "0%");
    assert_eq!(percentage(5, 0), "0%");
  }

  #[test]
  fn window_spans_thirty_one_days() {
    let today = Date::from_ymd_opt(2026, 3, 12).unwrap();
    let window = submission_window(today);

    assert_eq!(window.len(), 31);
    assert_eq!(window.first().copied(), Some(today - TimeDelta::days(30)));
    assert_eq!(window.last().copied(), Some(today));

    // strictly increasing, no duplicates
    assert!(window.windows(2).all(|pair| pair[0] < pair[1]));
  }
}
