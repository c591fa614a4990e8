use std::time::Duration;

use crate::metrics::{RATE_LIMIT_ALLOWED, RATE_LIMIT_BLOCKED};
use crate::store::TtlStore;

// Distinct client keys remembered at once
const MAX_TRACKED_KEYS: usize = 10_000;

// Client identity + route, so limits apply per client per resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateLimitKey {
    pub client: String,
    pub path: String,
}

// Fixed-window admission control. Each key gets a counter that expires a
// full window after its last request; the window restarts at the first
// request after expiry.
pub struct RateLimiter {
    counters: TtlStore<RateLimitKey, u32>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            counters: TtlStore::new(window, MAX_TRACKED_KEYS),
            max_requests,
            window,
        }
    }

    // True while the key's count stays within the configured limit for the
    // current window. Every call counts against the window, allowed or not.
    pub fn allow(&self, key: RateLimitKey) -> bool {
        let count = self.counters.bump(key);
        if count <= self.max_requests {
            RATE_LIMIT_ALLOWED.inc();
            true
        } else {
            RATE_LIMIT_BLOCKED.inc();
            false
        }
    }

    // The store doesn't expose per-key remaining TTL, so answer with the
    // full window as a conservative approximation.
    pub fn retry_after_seconds(&self) -> u64 {
        self.window.as_secs()
    }
}
