// src/limiter.rs

// flux-bucket: a token bucket rate limiter.

// dependencies
use crate::clock::{Clock, SystemClock, saturating_nanos};
use crate::config::LimiterConfig;
use crate::errors::LimiterError;
use crate::reservation::Reservation;
use parking_lot::Mutex;
use std::time::Duration;

/// A token bucket.
///
/// The bucket holds at most `capacity` tokens and gains one token every
/// `refill_interval` while below capacity. Tokens are recomputed lazily on
/// each call, there is no background timer. C is the clock type, defaulting
/// to SystemClock.
///
/// All state lives behind one mutex, and the clock is read while holding it,
/// so concurrent reservations are linearizable.
#[derive(Debug)]
pub struct Limiter<C = SystemClock>
where
    C: Clock,
{
    state: Mutex<BucketState>,
    clock: C,
}

#[derive(Debug)]
struct BucketState {
    refill_interval: Duration,
    capacity: u64,
    tokens: u64,
    // zero means unset: fresh or reset bucket
    last_refill_nanos: u64,
}

impl BucketState {
    fn is_closed(&self) -> bool {
        self.capacity == 0 || self.refill_interval.is_zero()
    }

    // tokens as they would appear at `now`, never above capacity
    fn available_at(&self, now: u64) -> u64 {
        if self.refill_interval.is_zero() {
            return self.tokens.min(self.capacity);
        }
        let elapsed = now.saturating_sub(self.last_refill_nanos) as u128;
        let accrued = elapsed / self.refill_interval.as_nanos();
        let accrued = u64::try_from(accrued).unwrap_or(u64::MAX);
        self.tokens.saturating_add(accrued).min(self.capacity)
    }

    fn next_token_at(&self) -> u64 {
        let interval = saturating_nanos(self.refill_interval);
        self.last_refill_nanos.saturating_add(interval)
    }
}

impl Limiter<SystemClock> {
    /// Create a limiter driven by the system clock.
    ///
    /// A new token is generated every `refill_interval`, and at most
    /// `capacity` tokens are held. The bucket starts full.
    pub fn new(refill_interval: Duration, capacity: u64) -> Self {
        Self::with_clock(refill_interval, capacity, SystemClock)
    }
}

// methods for the Limiter type
impl<C> Limiter<C>
where
    C: Clock,
{
    /// Create a limiter reading time from `clock`.
    ///
    /// A zero interval or zero capacity is accepted and yields a limiter
    /// that denies every request. Use [`Limiter::with_config`] to reject
    /// such settings up front.
    pub fn with_clock(refill_interval: Duration, capacity: u64, clock: C) -> Self {
        Self {
            state: Mutex::new(BucketState {
                refill_interval,
                capacity,
                tokens: capacity,
                last_refill_nanos: 0,
            }),
            clock,
        }
    }

    // method to create a new limiter from a config object
    pub fn with_config(config: LimiterConfig, clock: C) -> Result<Self, LimiterError> {
        config.validate()?;
        Ok(Self::with_clock(config.refill_interval, config.capacity, clock))
    }

    /// Try to take `n` tokens.
    ///
    /// Returns whether the tokens were granted together with the state of
    /// the bucket after the attempt. A request for zero tokens is always
    /// granted and leaves the bucket untouched. A closed limiter (zero
    /// capacity or zero interval) denies everything else.
    ///
    /// The refill baseline only moves on a grant, so repeated denials never
    /// delay the next token.
    pub fn reserve_n(&self, n: u64) -> (bool, Reservation) {
        if n == 0 {
            return (true, Reservation::default());
        }

        let mut state = self.state.lock();
        if state.is_closed() {
            tracing::trace!(
                capacity = state.capacity,
                refill_interval = ?state.refill_interval,
                "reservation denied by closed limiter"
            );
            return (false, Reservation::default());
        }

        let now = self.clock.now();
        let available = state.available_at(now);

        let granted = available >= n;
        let remaining = if granted {
            state.tokens = available - n;
            state.last_refill_nanos = now;
            state.tokens
        } else {
            // lazy clamp after a capacity decrease; accrual stays measured
            // from the unmoved baseline
            state.tokens = state.tokens.min(state.capacity);
            tracing::trace!(requested = n, available, "reservation denied");
            available
        };

        let reservation = Reservation {
            burst: state.capacity,
            remaining,
            reset_time_nanos: (remaining == 0).then(|| state.next_token_at()),
        };

        (granted, reservation)
    }

    /// Shorthand for `reserve_n(1)`.
    pub fn reserve(&self) -> (bool, Reservation) {
        self.reserve_n(1)
    }

    /// Like `reserve_n` but only reports whether the tokens were granted.
    pub fn allow_n(&self, n: u64) -> bool {
        self.reserve_n(n).0
    }

    /// Shorthand for `allow_n(1)`.
    pub fn allow(&self) -> bool {
        self.allow_n(1)
    }

    /// Tokens available right now, including those accrued since the last
    /// grant. Does not consume anything.
    pub fn tokens(&self) -> u64 {
        let state = self.state.lock();
        let now = self.clock.now();
        state.available_at(now)
    }

    pub fn capacity(&self) -> u64 {
        self.state.lock().capacity
    }

    /// Change the capacity without resetting the bucket.
    ///
    /// A lower capacity is applied to the stored tokens on the next
    /// reservation or inspection.
    pub fn set_capacity(&self, capacity: u64) {
        let mut state = self.state.lock();
        tracing::debug!(from = state.capacity, to = capacity, "capacity changed");
        state.capacity = capacity;
    }

    pub fn refill_interval(&self) -> Duration {
        self.state.lock().refill_interval
    }

    /// Change the refill interval without resetting the bucket.
    pub fn set_refill_interval(&self, refill_interval: Duration) {
        let mut state = self.state.lock();
        tracing::debug!(
            from = ?state.refill_interval,
            to = ?refill_interval,
            "refill interval changed"
        );
        state.refill_interval = refill_interval;
    }

    /// Time of the last grant in nanoseconds since epoch, zero if none.
    pub fn last_refill_nanos(&self) -> u64 {
        self.state.lock().last_refill_nanos
    }

    // full again and no grant for at least `max_idle_nanos`, judged from one
    // locked snapshot
    pub(crate) fn is_idle_full(&self, now: u64, max_idle_nanos: u64) -> bool {
        let state = self.state.lock();
        let idle = now.saturating_sub(state.last_refill_nanos) >= max_idle_nanos;
        idle && state.available_at(now) >= state.capacity
    }

    /// Refill the bucket and forget its history.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.tokens = state.capacity;
        state.last_refill_nanos = 0;
        tracing::debug!(capacity = state.capacity, "limiter reset");
    }
}
