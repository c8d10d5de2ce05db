// src/lib.rs

//! # Flux Bucket
//!
//! A thread-safe token bucket rate limiter.
//!
//! A [`Limiter`] holds up to `capacity` tokens and gains one token every
//! `refill_interval`. Each request takes tokens; when not enough are left it
//! is denied, and the returned [`Reservation`] says when the next token
//! arrives.
//!
//! ## Quick Example
//!
//! ```rust
//! use flux_bucket::Limiter;
//! use std::time::Duration;
//!
//! let limiter = Limiter::new(Duration::from_secs(10), 3);
//!
//! let (allowed, reservation) = limiter.reserve();
//! if allowed {
//!     println!("Request allowed, {} left", reservation.remaining);
//! } else {
//!     println!("Rate limited until {:?}", reservation.reset_time());
//! }
//! ```

// private modules
mod clock;
mod config;
mod errors;
mod headers;
mod keyed;
mod limiter;
mod reservation;

// public API exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LimiterConfig;
pub use errors::LimiterError;
pub use headers::{HEADER_LIMIT, HEADER_REMAINING, HEADER_RESET, RateLimitHeaders, client_key};
pub use keyed::KeyedLimiter;
pub use limiter::Limiter;
pub use reservation::{Reservation, ResetFormat};
