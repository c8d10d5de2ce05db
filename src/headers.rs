// src/headers.rs

//! Rate limit response headers rendered from a [`Reservation`]

// dependencies
use crate::reservation::{Reservation, ResetFormat};

pub const HEADER_LIMIT: &str = "X-RateLimit-Limit";
pub const HEADER_REMAINING: &str = "X-RateLimit-Remaining";
pub const HEADER_RESET: &str = "X-RateLimit-Reset";

/// Header values describing a reservation to a remote client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitHeaders {
    pub limit: String,
    pub remaining: String,
    pub reset: String,
}

impl RateLimitHeaders {
    /// Render `reservation`, using the conventional "no reset" text of
    /// `format` when no reset time is set.
    pub fn from_reservation(reservation: &Reservation, format: ResetFormat) -> Self {
        Self::with_sentinel(reservation, format, format.absent_sentinel())
    }

    pub fn with_sentinel(reservation: &Reservation, format: ResetFormat, absent: &str) -> Self {
        Self {
            limit: reservation.burst.to_string(),
            remaining: reservation.remaining.to_string(),
            reset: reservation.format_reset(format, absent),
        }
    }

    /// `(name, value)` pairs in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (HEADER_LIMIT, self.limit.as_str()),
            (HEADER_REMAINING, self.remaining.as_str()),
            (HEADER_RESET, self.reset.as_str()),
        ]
        .into_iter()
    }
}

/// Reduce a remote socket address to a per-host key by dropping the port.
///
/// `127.0.0.1:5123` becomes `127.0.0.1` and `[::1]:5123` becomes `::1`.
/// Text without a port is returned unchanged apart from IPv6 brackets.
pub fn client_key(remote_addr: &str) -> &str {
    if let Some(rest) = remote_addr.strip_prefix('[') {
        return match rest.find(']') {
            Some(end) => &rest[..end],
            None => rest,
        };
    }

    match remote_addr.rsplit_once(':') {
        // bare IPv6 without brackets has no port to strip
        Some((host, _)) if !host.contains(':') => host,
        _ => remote_addr,
    }
}
