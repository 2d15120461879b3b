use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::FormatError;

const PUBLISHED_FORMAT: &str = "%A, %B %-d, %Y at %-I:%M %p";

const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Uppercases the first character of every whitespace-delimited word.
/// The rest of each word is left as is.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start && !ch.is_whitespace() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }
    out
}

/// Parses a stored timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, FormatError> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| FormatError::Timestamp(raw.to_string()))
}

/// `Thursday, October 15, 2015 at 6:15 PM`
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.format(PUBLISHED_FORMAT).to_string()
}

pub fn format_timestamp(raw: &str) -> Result<String, FormatError> {
    parse_timestamp(raw).map(|dt| format_instant(&dt))
}

/// `MM:SS`, or `HH:MM:SS` once the total reaches an hour.
pub fn format_duration(total_seconds: i64) -> Result<String, FormatError> {
    if total_seconds < 0 {
        return Err(FormatError::NegativeDuration(total_seconds));
    }
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        Ok(format!("{:02}:{:02}:{:02}", hours, minutes, seconds))
    } else {
        Ok(format!("{:02}:{:02}", minutes, seconds))
    }
}
