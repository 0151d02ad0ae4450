use chrono::{DateTime, Duration, NaiveDate};

// The only date shape we read from forms and write to the backend.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date as `YYYY-MM-DD`.
pub fn formatted_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Returns the calendar day `days` before `date`.
pub fn date_minus_days(date: NaiveDate, days: u32) -> NaiveDate {
    date - Duration::days(days as i64)
}

/// Parse user or backend text into a calendar date.
///
/// Accepts `YYYY-MM-DD` and, for records written by older clients, a full RFC 3339
/// timestamp whose calendar day is used. Anything that doesn't name a real day
/// (e.g. "2023-02-30") yields `None`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

/// Whether `date` falls within the inclusive range `[today - days, today]`.
pub fn is_within_last_days(date: NaiveDate, today: NaiveDate, days: u32) -> bool {
    date >= date_minus_days(today, days) && date <= today
}
