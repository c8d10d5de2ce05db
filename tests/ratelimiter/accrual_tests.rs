// tests/ratelimiter/accrual_tests.rs

#[cfg(test)]
mod tests {

    use crate::fixtures::test_clock::{MS, advance_ms, limiter_at_zero};
    use flux_bucket::Reservation;
    use std::time::Duration;

    #[test]
    fn tokens_accrue_one_per_interval() {
        let (limiter, clock) = limiter_at_zero(250, 10);
        assert!(limiter.allow_n(10));

        for k in 1..=4 {
            advance_ms(&clock, 250);
            assert_eq!(limiter.tokens(), k);
        }
    }

    #[test]
    fn accrual_starts_from_partial_bucket() {
        let (limiter, clock) = limiter_at_zero(100, 5);
        assert!(limiter.allow_n(3)); // 2 left

        advance_ms(&clock, 200);
        assert_eq!(limiter.tokens(), 4);

        advance_ms(&clock, 500);
        assert_eq!(limiter.tokens(), 5);
    }

    #[test]
    fn no_token_one_nanosecond_early() {
        let (limiter, clock) = limiter_at_zero(100, 1);
        assert!(limiter.allow());

        clock.advance(Duration::from_nanos(100 * MS - 1));
        assert!(!limiter.allow());

        clock.advance(Duration::from_nanos(1));
        assert!(limiter.allow());
    }

    #[test]
    fn repeated_denials_do_not_delay_next_token() {
        let (limiter, clock) = limiter_at_zero(100, 1);
        assert!(limiter.allow());

        for _ in 0..9 {
            advance_ms(&clock, 10);
            assert!(!limiter.allow());
        }
        assert_eq!(limiter.last_refill_nanos(), 0);

        advance_ms(&clock, 10);
        assert!(limiter.allow());
    }

    #[test]
    fn denied_reservation_reports_accrued_tokens() {
        let (limiter, clock) = limiter_at_zero(100, 4);
        assert!(limiter.allow_n(4));

        advance_ms(&clock, 200);
        let (ok, res) = limiter.reserve_n(3);
        assert!(!ok);
        assert_eq!(res.remaining, 2);
        assert!(res.reset_time_nanos.is_none());
    }

    #[test]
    fn reserve_zero_never_mutates() {
        let (limiter, clock) = limiter_at_zero(100, 3);
        assert!(limiter.allow_n(2));
        advance_ms(&clock, 150);

        let before = (limiter.tokens(), limiter.last_refill_nanos());
        for _ in 0..5 {
            assert_eq!(limiter.reserve_n(0), (true, Reservation::default()));
        }
        assert_eq!((limiter.tokens(), limiter.last_refill_nanos()), before);
    }

    #[test]
    fn grant_discards_partial_interval() {
        let (limiter, clock) = limiter_at_zero(100, 2);
        assert!(limiter.allow_n(2));

        advance_ms(&clock, 150);
        let (ok, res) = limiter.reserve();
        assert!(ok);
        assert_eq!(res.reset_time_nanos, Some(250 * MS));

        // the 50ms left over before the grant do not count
        advance_ms(&clock, 60);
        assert_eq!(limiter.tokens(), 0);
        advance_ms(&clock, 40);
        assert_eq!(limiter.tokens(), 1);
    }
}
