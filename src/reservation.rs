// src/reservation.rs

//! Snapshot returned by every reservation attempt

// dependencies
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Status of a Limiter right after one reservation attempt.
///
/// `reset_time_nanos` is only present when no tokens remain and then holds
/// the instant the next token becomes available. An absent reset is `None`,
/// never a zero timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Capacity of the limiter at the time of the call
    pub burst: u64,
    /// Tokens left after the attempt
    pub remaining: u64,
    /// When the next token is generated (nanoseconds since epoch)
    #[serde(rename = "reset")]
    pub reset_time_nanos: Option<u64>,
}

/// Encodings for the reset time of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetFormat {
    /// Whole seconds since the Unix epoch
    UnixSeconds,
    /// Nanoseconds since the Unix epoch
    #[default]
    UnixNanos,
    /// RFC 3339 in UTC, e.g. `2024-01-01T00:00:00.100Z`
    Rfc3339,
}

impl ResetFormat {
    /// Conventional text for "no reset" in this encoding.
    pub fn absent_sentinel(&self) -> &'static str {
        match self {
            ResetFormat::UnixSeconds | ResetFormat::UnixNanos => "0",
            ResetFormat::Rfc3339 => "",
        }
    }
}

impl Reservation {
    /// Reset time as a `SystemTime`, if present.
    pub fn reset_time(&self) -> Option<SystemTime> {
        self.reset_time_nanos
            .map(|nanos| UNIX_EPOCH + Duration::from_nanos(nanos))
    }

    /// Reset time in whole Unix seconds, `0` when absent.
    pub fn reset_unix(&self) -> i64 {
        self.reset_time_nanos
            .map(|nanos| (nanos / 1_000_000_000) as i64)
            .unwrap_or(0)
    }

    /// Reset time in Unix nanoseconds, `0` when absent.
    pub fn reset_unix_nanos(&self) -> i64 {
        self.reset_time_nanos
            .map(|nanos| i64::try_from(nanos).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }

    /// Render the reset time in `format`, or `absent` if there is none.
    pub fn format_reset(&self, format: ResetFormat, absent: &str) -> String {
        if self.reset_time_nanos.is_none() {
            return absent.to_string();
        }

        match format {
            ResetFormat::UnixSeconds => self.reset_unix().to_string(),
            ResetFormat::UnixNanos => self.reset_unix_nanos().to_string(),
            ResetFormat::Rfc3339 => DateTime::<Utc>::from_timestamp_nanos(self.reset_unix_nanos())
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}
