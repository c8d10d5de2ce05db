// tests/ratelimiter/headers_tests.rs

#[cfg(test)]
mod tests {

    use crate::fixtures::test_clock::limiter_at_zero;
    use flux_bucket::{HEADER_RESET, RateLimitHeaders, ResetFormat};

    #[test]
    fn headers_follow_the_bucket() {
        let (limiter, _) = limiter_at_zero(1500, 2);

        let (_, res) = limiter.reserve();
        let headers = RateLimitHeaders::from_reservation(&res, ResetFormat::UnixNanos);
        assert_eq!(headers.limit, "2");
        assert_eq!(headers.remaining, "1");
        assert_eq!(headers.reset, "0");

        let (_, res) = limiter.reserve();
        let headers = RateLimitHeaders::from_reservation(&res, ResetFormat::UnixSeconds);
        assert_eq!(headers.remaining, "0");
        assert_eq!(headers.reset, "1");

        let headers = RateLimitHeaders::from_reservation(&res, ResetFormat::Rfc3339);
        let reset = headers
            .iter()
            .find(|(name, _)| *name == HEADER_RESET)
            .map(|(_, value)| value.to_string());
        assert_eq!(reset.as_deref(), Some("1970-01-01T00:00:01.500Z"));
    }

    #[test]
    fn reservation_json_round_trips() {
        let (limiter, _) = limiter_at_zero(100, 1);
        let (_, res) = limiter.reserve();

        let json = serde_json::to_string(&res).unwrap();
        assert_eq!(json, r#"{"burst":1,"remaining":0,"reset":100000000}"#);
        assert_eq!(serde_json::from_str::<flux_bucket::Reservation>(&json).unwrap(), res);
    }
}
