//! The "last week" window and timestamp parsing.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Seven-day window before the current Monday-aligned week.
///
/// `start` keeps the time-of-day of the moment it was computed from.
/// Membership is inclusive on both ends and extends one day past `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LastWeek {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl LastWeek {
    /// Window preceding the week that contains `now`.
    pub fn preceding(now: DateTime<FixedOffset>) -> Self {
        let back = i64::from(now.weekday().num_days_from_monday()) + 7;
        let start = now - Duration::days(back);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// Latest instant still counted as last week.
    pub fn upper_bound(&self) -> DateTime<FixedOffset> {
        self.end + Duration::days(1)
    }

    pub fn contains(&self, at: DateTime<FixedOffset>) -> bool {
        self.start <= at && at <= self.upper_bound()
    }

    /// `YYYY-MM-DD ~ YYYY-MM-DD`
    pub fn date_range_label(&self) -> String {
        format!(
            "{} ~ {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Parse an ISO-8601 timestamp as served by the wiki.
///
/// A trailing `Z` is read as `+00:00`. Timestamps without an offset are
/// taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    let normalized = match raw.strip_suffix('Z') {
        Some(rest) => format!("{}+00:00", rest),
        None => raw.to_string(),
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(parsed);
    }
    if let Ok(parsed) = DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(parsed);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}
