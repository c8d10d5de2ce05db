// src/keyed.rs

//! One limiter per caller identity

// dependencies
use crate::clock::{Clock, SystemClock, saturating_nanos};
use crate::config::LimiterConfig;
use crate::errors::LimiterError;
use crate::limiter::Limiter;
use crate::reservation::Reservation;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

/// A map of independent limiters keyed by caller identity.
/// K is the type used to identify clients (e.g., an address, an API key).
/// C is the clock type, defaulting to SystemClock. Every limiter gets a
/// clone of the same clock.
///
/// Limiters are created on first use from the current configuration.
#[derive(Debug)]
pub struct KeyedLimiter<K, C = SystemClock>
where
    K: Hash + Eq + Clone,
    C: Clock + Clone,
{
    config: RwLock<LimiterConfig>,
    limiters: DashMap<K, Arc<Limiter<C>>>,
    clock: C,
}

impl<K> KeyedLimiter<K, SystemClock>
where
    K: Hash + Eq + Clone,
{
    pub fn new(refill_interval: Duration, capacity: u64) -> Self {
        Self::with_clock(LimiterConfig::new(refill_interval, capacity), SystemClock)
    }
}

impl<K, C> KeyedLimiter<K, C>
where
    K: Hash + Eq + Clone,
    C: Clock + Clone,
{
    /// Build a keyed limiter without validating `config`; a closed
    /// configuration denies every key.
    pub fn with_clock(config: LimiterConfig, clock: C) -> Self {
        Self {
            config: RwLock::new(config),
            limiters: DashMap::new(),
            clock,
        }
    }

    // method to create a new keyed limiter from a validated config object
    pub fn with_config(config: LimiterConfig, clock: C) -> Result<Self, LimiterError> {
        config.validate()?;
        Ok(Self::with_clock(config, clock))
    }

    /// Configuration applied to newly created limiters.
    pub fn config(&self) -> LimiterConfig {
        *self.config.read()
    }

    /// The limiter for `key`, created full if it does not exist yet.
    pub fn limiter(&self, key: &K) -> Arc<Limiter<C>> {
        if let Some(limiter) = self.limiters.get(key) {
            return Arc::clone(limiter.value());
        }

        let entry = self.limiters.entry(key.clone()).or_insert_with(|| {
            let config = *self.config.read();
            tracing::debug!(capacity = config.capacity, "creating limiter for new client");
            Arc::new(Limiter::with_clock(
                config.refill_interval,
                config.capacity,
                self.clock.clone(),
            ))
        });
        Arc::clone(entry.value())
    }

    pub fn reserve_n(&self, key: &K, n: u64) -> (bool, Reservation) {
        self.limiter(key).reserve_n(n)
    }

    pub fn reserve(&self, key: &K) -> (bool, Reservation) {
        self.reserve_n(key, 1)
    }

    pub fn allow(&self, key: &K) -> bool {
        self.reserve(key).0
    }

    /// Forget the limiter for `key`. Its next request starts from a full bucket.
    pub fn remove(&self, key: &K) -> bool {
        self.limiters.remove(key).is_some()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.limiters.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.limiters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limiters.is_empty()
    }

    /// Change the capacity of existing and future limiters.
    pub fn set_capacity(&self, capacity: u64) {
        self.config.write().capacity = capacity;
        for entry in self.limiters.iter() {
            entry.value().set_capacity(capacity);
        }
    }

    /// Change the refill interval of existing and future limiters.
    pub fn set_refill_interval(&self, refill_interval: Duration) {
        self.config.write().refill_interval = refill_interval;
        for entry in self.limiters.iter() {
            entry.value().set_refill_interval(refill_interval);
        }
    }

    // method to clean up stale clients
    /// Drop limiters whose bucket has refilled completely and whose last
    /// grant is at least `max_idle` old. Such a bucket is indistinguishable
    /// from a fresh one, so eviction loses no state. Limiters still held
    /// by a caller through [`KeyedLimiter::limiter`] are kept.
    pub fn cleanup_stale(&self, max_idle: Duration) -> usize {
        let now = self.clock.now();
        let max_idle_nanos = saturating_nanos(max_idle);
        let before = self.limiters.len();

        self.limiters.retain(|_, limiter| {
            Arc::strong_count(limiter) > 1 || !limiter.is_idle_full(now, max_idle_nanos)
        });

        let removed = before.saturating_sub(self.limiters.len());
        tracing::debug!(removed, remaining = self.limiters.len(), "cleaned up stale clients");
        removed
    }
}
