//! Clock source and wall-clock formatting for game log entries.

use chrono::{Local, TimeZone, Utc};

/// Source of "now" for timestamps, injected so log times are deterministic in tests
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// Reads the real system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_timestamp()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    millis: i64,
}

impl FixedClock {
    pub fn new(millis: i64) -> Self {
        Self { millis }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn get_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as local wall-clock time (`HH:MM:SS`).
///
/// Out-of-range timestamps fall back to `00:00:00`.
pub fn timestamp_to_local_time(timestamp_millis: i64) -> String {
    format_wall_clock(&Local, timestamp_millis)
}

fn format_wall_clock<Tz: TimeZone>(tz: &Tz, timestamp_millis: i64) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "00:00:00".to_string(),
    }
}
