//! A collection of formatting functions used to build manifest entries
use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Formats a byte count as a human readable string with two decimals.
///
/// The magnitude is divided by 1024 until it drops below 1024 or the last
/// unit (`TB`) is reached. For example `1536` becomes `"1.50 KB"`.
pub fn format_size(bytes: u64) -> String {
    let mut magnitude = bytes as f64;
    let mut unit = 0;
    while magnitude >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        magnitude /= 1024.0;
        unit += 1;
    }
    format!("{magnitude:.2} {}", SIZE_UNITS[unit])
}

/// Formats a modification time as `MM/DD/YYYY` in the given timezone.
pub fn format_date<Tz>(time: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.with_timezone(tz).format("%m/%d/%Y").to_string()
}
