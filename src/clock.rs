// src/clock.rs

// clock module definition and implementations

// dependencies
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Clock trait to abstract time retrieval.
/// Implementors must be thread-safe (Send + Sync).
/// The `now` method returns the current time in nanoseconds since the Unix epoch.
/// The Limiter reads the clock inside its critical section on every reservation.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

// whole nanoseconds in `d`, capped at u64::MAX
pub(crate) fn saturating_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

/// SystemClock implementation using the system time.
/// Returns the current time in nanoseconds since the Unix epoch.
/// A wall clock set before the epoch reads as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => saturating_nanos(d),
            Err(e) => {
                tracing::warn!(
                    behind_nanos = saturating_nanos(e.duration()),
                    "system clock is before the unix epoch, reading as zero"
                );
                0
            }
        }
    }
}

/// Manually driven clock for deterministic tests.
///
/// Clones share the same timestamp, so a test can hand one clone to a
/// limiter and keep another to move time forward.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    time: Arc<AtomicU64>, // nanos
}

impl ManualClock {
    /// Create a clock reading `start_nanos`.
    pub fn new(start_nanos: u64) -> Self {
        Self {
            time: Arc::new(AtomicU64::new(start_nanos)),
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let nanos = saturating_nanos(by);
        // saturate instead of wrapping
        let _ = self
            .time
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |t| {
                Some(t.saturating_add(nanos))
            });
    }

    /// Jump to an absolute timestamp. Moving backwards is allowed.
    pub fn set(&self, nanos: u64) {
        self.time.store(nanos, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.time.load(Ordering::SeqCst)
    }
}
