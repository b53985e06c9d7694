pub mod user_dto;
pub mod gift_dto;
pub mod announcement_dto;
pub mod exchange_date_dto;

use chrono::SecondsFormat;

/// Stored dates go out as ISO 8601 with milliseconds in UTC.
pub(crate) fn render_timestamp(date: bson::DateTime) -> String {
    date.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true)
}
