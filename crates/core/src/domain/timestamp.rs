use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// An ISO-8601 timestamp as written in a queue file, together with the
/// instant it denotes.
///
/// Equality and ordering compare instants, so `2024-01-01T09:00:00+09:00`
/// equals `2024-01-01T00:00:00Z`. Serializes back to the original text.
#[derive(Debug, Clone)]
pub struct Timestamp {
  raw: String,
  instant: DateTime<FixedOffset>,
}

impl Timestamp {
  /// Parse an ISO-8601 date or date-time. A trailing `Z` means UTC; values
  /// without an offset are taken as UTC.
  pub fn parse(raw: &str) -> Option<Self> {
    parse_instant(raw).map(|instant| Self {
      raw: raw.to_string(),
      instant,
    })
  }

  pub fn as_str(&self) -> &str {
    &self.raw
  }

  pub fn instant(&self) -> DateTime<FixedOffset> {
    self.instant
  }

  /// Canonical ISO-8601 rendering of the instant, keeping its offset.
  pub fn to_iso8601(&self) -> String {
    self.instant.to_rfc3339_opts(SecondsFormat::AutoSi, false)
  }
}

impl PartialEq for Timestamp {
  fn eq(&self, other: &Self) -> bool {
    self.instant == other.instant
  }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Timestamp {
  fn cmp(&self, other: &Self) -> Ordering {
    self.instant.cmp(&other.instant)
  }
}

impl fmt::Display for Timestamp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}

impl Serialize for Timestamp {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.raw)
  }
}

const OFFSET_FORMATS: [&str; 4] = [
  "%Y-%m-%dT%H:%M:%S%.f%:z",
  "%Y-%m-%d %H:%M:%S%.f%:z",
  "%Y-%m-%dT%H:%M:%S%.f%z",
  "%Y-%m-%dT%H:%M%:z",
];

const NAIVE_FORMATS: [&str; 4] = [
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M",
];

fn parse_instant(raw: &str) -> Option<DateTime<FixedOffset>> {
  let trimmed = raw.trim();
  let normalized = match trimmed.strip_suffix('Z').or_else(|| trimmed.strip_suffix('z')) {
    Some(head) => format!("{head}+00:00"),
    None => trimmed.to_string(),
  };

  if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
    return Some(dt);
  }
  for format in OFFSET_FORMATS {
    if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
      return Some(dt);
    }
  }
  for format in NAIVE_FORMATS {
    if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
      return Some(naive.and_utc().fixed_offset());
    }
  }
  NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc().fixed_offset())
}

/// Current time in the same representation, used for envelope metadata.
pub fn now_iso8601() -> String {
  Utc::now().to_rfc3339_opts(SecondsFormat::Millis, false)
}
