//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use beacon_core::SecretVerification;
use beacon_core::services::DEFAULT_CHECK_TIMEOUT;
use beacon_infra::DatabaseConfig;

#[cfg(feature = "http-revalidate")]
use beacon_infra::HttpRevalidatorConfig;
#[cfg(feature = "redis")]
use beacon_infra::RedisConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    #[cfg(feature = "redis")]
    pub redis: Option<RedisConfig>,
    #[cfg(feature = "http-revalidate")]
    pub revalidate: Option<HttpRevalidatorConfig>,
    /// Key namespace for the in-memory store (Redis carries its own).
    pub rate_limit_key_prefix: String,
    /// Bound on one rate-limit store round-trip.
    pub rate_limit_timeout: Duration,
    pub revalidate_max_attempts: u32,
    pub webhook_verification: SecretVerification,
    pub export_access: SecretVerification,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            #[cfg(feature = "redis")]
            redis: RedisConfig::from_env(),
            #[cfg(feature = "http-revalidate")]
            revalidate: HttpRevalidatorConfig::from_env(),
            rate_limit_key_prefix: env::var("RATE_LIMIT_KEY_PREFIX")
                .unwrap_or_else(|_| "beacon:ratelimit".to_string()),
            rate_limit_timeout: env::var("RATE_LIMIT_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_CHECK_TIMEOUT),
            revalidate_max_attempts: env::var("REVALIDATE_MAX_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
            webhook_verification: SecretVerification::from_config(env::var("WEBHOOK_SECRET").ok()),
            export_access: SecretVerification::from_config(env::var("EXPORT_TOKEN").ok()),
        }
    }
}
