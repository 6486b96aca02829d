use chrono::{Local, TimeZone};

pub const MS_PER_HOUR: i64 = 60 * 60 * 1000;

pub fn ms_since_epoch() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Formats a timestamp as local wall-clock `HH:MM`.
pub fn local_hh_mm(timestamp_ms: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .earliest()
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}
