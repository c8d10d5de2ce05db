// src/config.rs

//! Configuration types for the token bucket limiter

// dependencies
use crate::errors::LimiterError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for limiter behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimiterConfig {
    pub(crate) refill_interval: Duration,
    pub(crate) capacity: u64,
}

impl LimiterConfig {
    /// Create a new configuration with refill interval and capacity settings
    pub fn new(refill_interval: Duration, capacity: u64) -> Self {
        Self {
            refill_interval,
            capacity,
        }
    }

    /// Builder-style: set the time needed to accrue one token
    pub fn refill_interval(mut self, refill_interval: Duration) -> Self {
        self.refill_interval = refill_interval;
        self
    }

    /// Builder-style: set burst capacity
    pub fn capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn get_refill_interval(&self) -> Duration {
        self.refill_interval
    }

    pub fn get_capacity(&self) -> u64 {
        self.capacity
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LimiterError> {
        if self.refill_interval.is_zero() {
            return Err(LimiterError::InvalidRefillInterval);
        }
        if self.capacity == 0 {
            return Err(LimiterError::InvalidCapacity);
        }
        Ok(())
    }
}
