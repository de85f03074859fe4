//! Human-friendly relative dates for idea timestamps.

use chrono::{DateTime, Local, TimeZone, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days between `date` and `now`, floored. Negative for future dates.
pub fn days_between(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - date).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// "Today", "Yesterday", "N days ago" within a week, otherwise the calendar
/// date in the local time zone. Future dates fall through to the calendar date.
pub fn format_relative_date_at(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match days_between(date, now) {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        n @ 2..=6 => format!("{} days ago", n),
        _ => calendar_date(&date.with_timezone(&Local)),
    }
}

pub fn format_relative_date(date: DateTime<Utc>) -> String {
    format_relative_date_at(date, Utc::now())
}

/// `M/D/YYYY`
pub fn calendar_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%-m/%-d/%Y").to_string()
}
