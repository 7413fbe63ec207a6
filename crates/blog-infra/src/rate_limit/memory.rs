//! In-memory sliding-window rate limiter.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use blog_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

/// In-memory rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 60,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_requests),
            window: std::env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.window),
        }
    }
}

/// Per-key sliding-window log: every accepted request's instant is kept
/// until it falls out of the trailing window.
///
/// Limits are per-process and reset on restart. Keys are never evicted, so
/// the map grows with the number of distinct keys seen.
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    requests: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Same as [`RateLimiter::check`] with an explicit clock reading.
    pub fn check_at(&self, key: &str, now: Instant) -> Result<RateLimitResult, RateLimitError> {
        let window = self.config.window;
        let max_requests = self.config.max_requests;

        let mut requests = self
            .requests
            .lock()
            .map_err(|_| RateLimitError::Backend("rate limiter lock poisoned".to_string()))?;
        let log = requests.entry(key.to_string()).or_default();

        while log
            .front()
            .is_some_and(|oldest| now.saturating_duration_since(*oldest) >= window)
        {
            log.pop_front();
        }

        let reset_after = log
            .front()
            .map(|oldest| (*oldest + window).saturating_duration_since(now))
            .unwrap_or(window);

        let used = log.len() as u32;
        if used >= max_requests {
            return Ok(RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_after,
            });
        }

        log.push_back(now);

        Ok(RateLimitResult {
            allowed: true,
            remaining: max_requests - used - 1,
            reset_after,
        })
    }
}

impl Default for InMemoryRateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        self.check_at(key, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixty_allowed_then_denied() {
        let limiter = InMemoryRateLimiter::default();
        let now = Instant::now();

        for i in 0..60 {
            let res = limiter.check_at("k", now).unwrap();
            assert!(res.allowed, "request {} should be allowed", i + 1);
            assert_eq!(res.remaining, 59 - i);
        }

        let res = limiter.check_at("k", now).unwrap();
        assert!(!res.allowed);
        assert_eq!(res.remaining, 0);
        assert_eq!(res.reset_after, Duration::from_secs(60));
    }

    #[test]
    fn test_window_elapses() {
        let limiter = InMemoryRateLimiter::default();
        let start = Instant::now();

        for _ in 0..60 {
            assert!(limiter.check_at("k", start).unwrap().allowed);
        }
        assert!(!limiter.check_at("k", start + Duration::from_secs(59)).unwrap().allowed);
        assert!(limiter.check_at("k", start + Duration::from_secs(60)).unwrap().allowed);
    }

    #[test]
    fn test_window_slides_per_request() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 2,
            window: Duration::from_secs(10),
        });
        let t0 = Instant::now();

        assert!(limiter.check_at("k", t0).unwrap().allowed);
        assert!(limiter.check_at("k", t0 + Duration::from_secs(5)).unwrap().allowed);

        let denied = limiter.check_at("k", t0 + Duration::from_secs(8)).unwrap();
        assert!(!denied.allowed);
        assert_eq!(denied.reset_after, Duration::from_secs(2));

        // Only the first request has left the window.
        assert!(limiter.check_at("k", t0 + Duration::from_secs(10)).unwrap().allowed);
        assert!(!limiter.check_at("k", t0 + Duration::from_secs(11)).unwrap().allowed);
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 1,
            window: Duration::from_secs(60),
        });
        let now = Instant::now();

        assert!(limiter.check_at("a", now).unwrap().allowed);
        assert!(!limiter.check_at("a", now).unwrap().allowed);
        assert!(limiter.check_at("b", now).unwrap().allowed);
    }

    #[test]
    fn test_denied_requests_are_not_recorded() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 1,
            window: Duration::from_secs(10),
        });
        let t0 = Instant::now();

        assert!(limiter.check_at("k", t0).unwrap().allowed);
        for s in 1..10 {
            assert!(!limiter.check_at("k", t0 + Duration::from_secs(s)).unwrap().allowed);
        }
        assert!(limiter.check_at("k", t0 + Duration::from_secs(10)).unwrap().allowed);
    }

    #[tokio::test]
    async fn test_trait_check_uses_wall_clock() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 1,
            window: Duration::from_secs(60),
        });

        assert!(limiter.check("key").await.unwrap().allowed);
        assert!(!limiter.check("key").await.unwrap().allowed);
    }
}
