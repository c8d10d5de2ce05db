// tests/ratelimiter/fixtures/test_clock.rs

// dependencies
use flux_bucket::{Limiter, ManualClock};
use std::time::Duration;

pub const MS: u64 = 1_000_000;

// Limiter on a manual clock starting at t=0, plus a handle to drive the clock
pub fn limiter_at_zero(refill_interval_ms: u64, capacity: u64) -> (Limiter<ManualClock>, ManualClock) {
    let clock = ManualClock::new(0);
    let limiter = Limiter::with_clock(
        Duration::from_millis(refill_interval_ms),
        capacity,
        clock.clone(),
    );
    (limiter, clock)
}

pub fn advance_ms(clock: &ManualClock, ms: u64) {
    clock.advance(Duration::from_millis(ms));
}
