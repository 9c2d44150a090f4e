//! Application state - shared across all handlers.

use std::sync::Arc;

use beacon_core::SecretVerification;
use beacon_core::ports::{PathRevalidator, RateLimitStore, WaitlistRepository};
use beacon_core::services::{RateLimitGuard, RevalidationDispatcher, WaitlistService};
use beacon_infra::{InMemoryPathRevalidator, InMemoryRateLimitStore, InMemoryWaitlistRepository};

#[cfg(feature = "http-revalidate")]
use beacon_infra::HttpPathRevalidator;
#[cfg(feature = "postgres")]
use beacon_infra::PostgresWaitlistRepository;
#[cfg(feature = "redis")]
use beacon_infra::RedisRateLimitStore;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub waitlist: Arc<WaitlistService>,
    pub waitlist_limiter: Arc<RateLimitGuard>,
    pub revalidation: Arc<RevalidationDispatcher>,
    pub webhook_verification: SecretVerification,
    pub export_access: SecretVerification,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let repo = Self::waitlist_repository(config).await;
        let store = Self::rate_limit_store(config).await?;
        let revalidator = Self::path_revalidator(config)?;

        if config.webhook_verification.is_open() {
            tracing::warn!("WEBHOOK_SECRET not set. CMS webhooks are accepted without verification.");
        }
        if config.export_access.is_open() {
            tracing::warn!("EXPORT_TOKEN not set. Email export is publicly readable.");
        }

        let state = Self {
            waitlist: Arc::new(WaitlistService::new(repo)),
            waitlist_limiter: Arc::new(
                RateLimitGuard::waitlist(store).with_timeout(config.rate_limit_timeout),
            ),
            revalidation: Arc::new(RevalidationDispatcher::new(
                revalidator,
                config.revalidate_max_attempts,
            )),
            webhook_verification: config.webhook_verification.clone(),
            export_access: config.export_access.clone(),
        };

        tracing::info!(
            rate_limit_backend = state.waitlist_limiter.backend(),
            "Application state initialized"
        );

        Ok(state)
    }

    /// Assemble state from already-built ports, with default policy settings.
    #[cfg(test)]
    pub fn from_parts(
        repo: Arc<dyn WaitlistRepository>,
        store: Arc<dyn RateLimitStore>,
        revalidator: Arc<dyn PathRevalidator>,
        webhook_verification: SecretVerification,
        export_access: SecretVerification,
    ) -> Self {
        Self {
            waitlist: Arc::new(WaitlistService::new(repo)),
            waitlist_limiter: Arc::new(RateLimitGuard::waitlist(store)),
            revalidation: Arc::new(RevalidationDispatcher::new(revalidator, 2)),
            webhook_verification,
            export_access,
        }
    }

    async fn waitlist_repository(config: &AppConfig) -> Arc<dyn WaitlistRepository> {
        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match db_config.connect().await {
                    Ok(conn) => return Arc::new(PostgresWaitlistRepository::new(conn)),
                    Err(e) => tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    ),
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL set but postgres feature is disabled - using in-memory repository");
        }

        Arc::new(InMemoryWaitlistRepository::new())
    }

    async fn rate_limit_store(config: &AppConfig) -> anyhow::Result<Arc<dyn RateLimitStore>> {
        #[cfg(feature = "redis")]
        if let Some(redis_config) = &config.redis {
            match RedisRateLimitStore::new(redis_config.clone()).await {
                Ok(store) => return Ok(Arc::new(store)),
                Err(e) if redis_config.fallback_to_memory => {
                    tracing::error!(
                        "Failed to connect to Redis: {}. Using per-process in-memory rate limits.",
                        e
                    );
                }
                Err(e) => return Err(anyhow::anyhow!("Redis rate limit store unavailable: {}", e)),
            }
        }

        tracing::warn!("Rate limits are per-process (in-memory store).");
        Ok(Arc::new(InMemoryRateLimitStore::new(
            config.rate_limit_key_prefix.clone(),
        )))
    }

    #[cfg_attr(not(feature = "http-revalidate"), allow(unused_variables))]
    fn path_revalidator(config: &AppConfig) -> anyhow::Result<Arc<dyn PathRevalidator>> {
        #[cfg(feature = "http-revalidate")]
        if let Some(hook) = &config.revalidate {
            let revalidator = HttpPathRevalidator::new(hook.clone())
                .map_err(|e| anyhow::anyhow!("Invalid revalidation hook: {}", e))?;
            tracing::info!(url = %hook.url, "Revalidation hook configured");
            return Ok(Arc::new(revalidator));
        }

        tracing::warn!("REVALIDATE_URL not set. Revalidations are only recorded in memory.");
        Ok(Arc::new(InMemoryPathRevalidator::new()))
    }
}
