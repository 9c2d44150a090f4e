//! Redis rate limit store using a sliding log in a sorted set.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Client, Script};

use beacon_core::domain::{RateLimitDecision, WindowSpec};
use beacon_core::ports::{RateLimitError, RateLimitStore};

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Whether to fall back to the in-memory store if Redis is unavailable
    pub fallback_to_memory: bool,
    /// Key prefix for rate limit keys
    pub key_prefix: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
            fallback_to_memory: true,
            key_prefix: "beacon:ratelimit".to_string(),
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables.
    /// Returns `None` when `REDIS_URL` is not set.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("REDIS_URL").ok()?;
        Some(Self {
            url,
            connect_timeout: Duration::from_secs(
                std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            fallback_to_memory: std::env::var("REDIS_FALLBACK_TO_MEMORY")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            key_prefix: std::env::var("RATE_LIMIT_KEY_PREFIX")
                .unwrap_or_else(|_| "beacon:ratelimit".to_string()),
        })
    }
}

// KEYS[1] = log key
// ARGV[1] = now (ms), ARGV[2] = window (ms), ARGV[3] = max requests, ARGV[4] = member id
// Returns: {allowed (0|1), used, oldest_ms}
const SLIDING_WINDOW_SCRIPT: &str = r#"
local key = KEYS[1]
local now = tonumber(ARGV[1])
local window = tonumber(ARGV[2])
local limit = tonumber(ARGV[3])

redis.call('ZREMRANGEBYSCORE', key, '-inf', now - window)

local used = redis.call('ZCARD', key)
local allowed = 0
if used < limit then
    redis.call('ZADD', key, now, ARGV[4])
    used = used + 1
    allowed = 1
end
redis.call('PEXPIRE', key, window)

local oldest = redis.call('ZRANGE', key, 0, 0, 'WITHSCORES')
local oldest_ms = now
if oldest[2] then
    oldest_ms = tonumber(oldest[2])
end
return {allowed, used, oldest_ms}
"#;

/// Redis-backed sliding-window store shared by every server instance.
///
/// The prune, count and insert run in one Lua script, so concurrent requests
/// for the same key are serialized by Redis.
pub struct RedisRateLimitStore {
    conn: ConnectionManager,
    config: RedisConfig,
    script: Script,
}

impl RedisRateLimitStore {
    pub async fn new(config: RedisConfig) -> Result<Self, RateLimitError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn_manager_fut = ConnectionManager::new(client);
        let conn = tokio::time::timeout(config.connect_timeout, conn_manager_fut)
            .await
            .map_err(|_| RateLimitError::Timeout(config.connect_timeout))?
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        tracing::info!(key_prefix = %config.key_prefix, "Connected to Redis rate limit store");

        Ok(Self {
            conn,
            config,
            script: Script::new(SLIDING_WINDOW_SCRIPT),
        })
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}:{}", self.config.key_prefix, key)
    }
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn increment_and_check(
        &self,
        key: &str,
        window: &WindowSpec,
    ) -> Result<RateLimitDecision, RateLimitError> {
        let redis_key = self.make_key(key);
        let mut conn = self.conn.clone();
        let now_ms = chrono::Utc::now().timestamp_millis();
        let window_ms = window.window_ms();

        let (allowed, used, oldest_ms): (i64, i64, i64) = self
            .script
            .key(&redis_key)
            .arg(now_ms)
            .arg(window_ms)
            .arg(window.max_requests)
            // Unique member so attempts in the same millisecond are all counted
            .arg(format!("{}-{}", now_ms, uuid::Uuid::new_v4()))
            .invoke_async(&mut conn)
            .await
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        let used = u32::try_from(used.max(0)).unwrap_or(u32::MAX);

        Ok(RateLimitDecision {
            success: allowed == 1,
            limit: window.max_requests,
            remaining: window.max_requests.saturating_sub(used),
            reset_at_epoch_ms: oldest_ms + window_ms,
        })
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
