use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// `_id` of the one exchange date document.
pub const EXCHANGE_DATE_KEY: &str = "current";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeDate {
    #[serde(rename = "_id")]
    pub id: String,
    /// Absent when the date was set without a value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<bson::DateTime>,
}

impl ExchangeDate {
    pub fn new(date_time: Option<DateTime<Utc>>) -> Self {
        ExchangeDate {
            id: EXCHANGE_DATE_KEY.to_string(),
            date_time: date_time.map(bson::DateTime::from_chrono),
        }
    }

    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        self.date_time.map(|d| d.to_chrono())
    }
}

/// A client-supplied date: epoch milliseconds or a date string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DateTimeInput {
    Millis(f64),
    Text(String),
}

impl DateTimeInput {
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        match self {
            DateTimeInput::Millis(ms) if ms.is_finite() => DateTime::from_timestamp_millis(*ms as i64),
            DateTimeInput::Millis(_) => None,
            DateTimeInput::Text(raw) => parse_date_time(raw),
        }
    }
}

impl std::fmt::Display for DateTimeInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateTimeInput::Millis(ms) => write!(f, "{}", ms),
            DateTimeInput::Text(raw) => write!(f, "{}", raw),
        }
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (read as UTC) and bare dates.
pub fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
