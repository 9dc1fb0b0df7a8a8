use chrono::{Datelike, NaiveDateTime, Timelike};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Russian month name in the genitive case, as used after a day number
pub fn month_name_genitive(month: u32) -> &'static str {
    match month {
        1 => "января", 2 => "февраля", 3 => "марта", 4 => "апреля",
        5 => "мая", 6 => "июня", 7 => "июля", 8 => "августа",
        9 => "сентября", 10 => "октября", 11 => "ноября", 12 => "декабря",
        _ => "января",
    }
}

/// Parse `YYYY-MM-DDTHH:MM:SS` with an optional fraction (a space may stand in
/// for `T`). A trailing `Z` is dropped; the wall time is shown as sent.
pub fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    let timestamp = timestamp.strip_suffix('Z').unwrap_or(timestamp);
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(timestamp, format).ok())
}

/// Format a transaction timestamp for display, e.g. "10 марта 2019 г. в 03:20".
///
/// Input that does not parse is returned unchanged.
pub fn format_date(timestamp: &str) -> String {
    match parse_timestamp(timestamp) {
        Some(at) => format!(
            "{} {} {} г. в {:02}:{:02}",
            at.day(),
            month_name_genitive(at.month()),
            at.year(),
            at.hour(),
            at.minute()
        ),
        None => timestamp.to_string(),
    }
}
