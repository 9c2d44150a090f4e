//! In-memory sliding-window rate limit store.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::Mutex;

use beacon_core::domain::{RateLimitDecision, WindowSpec};
use beacon_core::ports::{RateLimitError, RateLimitStore};

/// Sliding log of accepted attempts per key.
///
/// This is the fallback when Redis is not available.
/// Note: Limits are per-process, not distributed across instances.
pub struct InMemoryRateLimitStore {
    key_prefix: String,
    windows: Mutex<HashMap<String, VecDeque<i64>>>,
}

impl InMemoryRateLimitStore {
    pub fn new(key_prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: key_prefix.into(),
            windows: Mutex::new(HashMap::new()),
        }
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }

    /// Check `key` as of `now_ms`. The whole check runs under one lock.
    pub(crate) async fn check_at(&self, key: &str, window: &WindowSpec, now_ms: i64) -> RateLimitDecision {
        let window_ms = window.window_ms();
        let mut windows = self.windows.lock().await;

        // Drop idle keys so the map does not grow without bound.
        windows.retain(|_, log| log.back().is_some_and(|&last| last > now_ms - window_ms));

        let log = windows.entry(self.make_key(key)).or_default();
        while log.front().is_some_and(|&oldest| oldest <= now_ms - window_ms) {
            log.pop_front();
        }

        let used = log.len() as u32;
        let success = used < window.max_requests;
        if success {
            log.push_back(now_ms);
        }

        let reset_at_epoch_ms = log.front().map_or(now_ms, |&oldest| oldest) + window_ms;

        RateLimitDecision {
            success,
            limit: window.max_requests,
            remaining: window.max_requests.saturating_sub(log.len() as u32),
            reset_at_epoch_ms,
        }
    }
}

impl Default for InMemoryRateLimitStore {
    fn default() -> Self {
        Self::new("ratelimit")
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn increment_and_check(
        &self,
        key: &str,
        window: &WindowSpec,
    ) -> Result<RateLimitDecision, RateLimitError> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        Ok(self.check_at(key, window, now_ms).await)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
