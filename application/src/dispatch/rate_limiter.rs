//! Per-provider token bucket.
//!
//! Enforces a provider's requests-per-minute limit without ever sleeping in
//! the call path: refill is computed lazily from elapsed time, and an empty
//! bucket simply means "skip this provider for this call".

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RateLimiter {
    capacity: f64,
    tokens: f64,
    refill_per_sec: f64,
    last_refill: Instant,
}

impl RateLimiter {
    pub fn per_minute(requests: u32) -> Self {
        Self::per_minute_at(requests, Instant::now())
    }

    pub fn per_minute_at(requests: u32, now: Instant) -> Self {
        let capacity = f64::from(requests.max(1));
        Self {
            capacity,
            tokens: capacity,
            refill_per_sec: capacity / 60.0,
            last_refill: now,
        }
    }

    pub fn try_acquire(&mut self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    pub fn try_acquire_at(&mut self, now: Instant) -> bool {
        self.refill(now);
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Whole permits left right now
    pub fn available(&mut self) -> u32 {
        self.available_at(Instant::now())
    }

    pub fn available_at(&mut self, now: Instant) -> u32 {
        self.refill(now);
        self.tokens.floor() as u32
    }

    fn refill(&mut self, now: Instant) {
        if now <= self.last_refill {
            return;
        }
        let elapsed = now.duration_since(self.last_refill);
        self.tokens = (self.tokens + elapsed.as_secs_f64() * self.refill_per_sec).min(self.capacity);
        self.last_refill = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_drains_then_refills() {
        let start = Instant::now();
        let mut limiter = RateLimiter::per_minute_at(2, start);

        assert!(limiter.try_acquire_at(start));
        assert!(limiter.try_acquire_at(start));
        assert!(!limiter.try_acquire_at(start));

        // 2 per minute refills one token every 30s
        assert!(!limiter.try_acquire_at(start + Duration::from_secs(20)));
        assert!(limiter.try_acquire_at(start + Duration::from_secs(31)));
    }

    #[test]
    fn test_refill_is_capped() {
        let start = Instant::now();
        let mut limiter = RateLimiter::per_minute_at(3, start);
        limiter.try_acquire_at(start);

        limiter.try_acquire_at(start + Duration::from_secs(3600));
        assert_eq!(limiter.available_at(start + Duration::from_secs(3600)), 2);
    }

    #[test]
    fn test_available_counts_refilled_permits() {
        let start = Instant::now();
        let mut limiter = RateLimiter::per_minute_at(60, start);
        for _ in 0..60 {
            assert!(limiter.try_acquire_at(start));
        }
        assert_eq!(limiter.available_at(start), 0);
        assert_eq!(limiter.available_at(start + Duration::from_secs(10)), 10);
        // an earlier instant never rewinds the bucket
        assert_eq!(limiter.available_at(start), 10);
    }
}
