// src/errors.rs

// error handling for the limiter configuration

// dependencies
use thiserror::Error;

/// Error type for Limiter configuration issues.
///
/// Only the validating constructors return this. A limiter built through
/// `Limiter::with_clock` with a zero interval or capacity is legal and
/// simply denies every request.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimiterError {
    #[error("Refill interval must be positive")]
    InvalidRefillInterval, // for refill_interval == 0
    #[error("Capacity must be positive")]
    InvalidCapacity, // for capacity == 0
}
