/// Utilities for date and time formatting
///
/// Values arrive from the reporting API as ISO-like strings and are shown
/// in the es-ES short form used by the pharmacy staff.
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Timelike};

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse the date forms the API is known to send.
/// Values with an offset are converted to local time.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format as es-ES short date with 12-hour time
/// Example: 2024-03-15T14:02:26 -> "15 mar 2024, 02:02 p. m."
pub fn format_datetime_es(dt: &NaiveDateTime) -> String {
    let (is_pm, hour12) = dt.hour12();
    format!(
        "{} {} {}, {:02}:{:02} {}",
        dt.day(),
        MONTHS_ES[dt.month0() as usize],
        dt.year(),
        hour12,
        dt.minute(),
        if is_pm { "p. m." } else { "a. m." }
    )
}

/// Today's date as yyyy-mm-dd, used in export file names
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
