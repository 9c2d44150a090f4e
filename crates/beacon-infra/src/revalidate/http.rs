//! HTTP revalidator - calls the frontend's on-demand revalidation hook.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use beacon_core::ports::{PathRevalidator, RevalidationError};

/// Header the frontend checks before honoring a revalidation call.
pub const REVALIDATE_TOKEN_HEADER: &str = "x-revalidate-token";

/// Revalidation hook configuration.
#[derive(Debug, Clone)]
pub struct HttpRevalidatorConfig {
    /// Hook URL (e.g., https://www.example.com/api/revalidate-path)
    pub url: String,
    /// Token sent in `x-revalidate-token`
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl HttpRevalidatorConfig {
    /// Load configuration from environment variables.
    /// Returns `None` when `REVALIDATE_URL` is not set.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("REVALIDATE_URL").ok()?;
        Some(Self {
            url,
            token: std::env::var("REVALIDATE_TOKEN").ok(),
            timeout: Duration::from_secs(
                std::env::var("REVALIDATE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        })
    }
}

#[derive(Serialize)]
struct RevalidatePathBody<'a> {
    path: &'a str,
}

/// Sends one `POST {url}` with `{"path": ...}` per path.
pub struct HttpPathRevalidator {
    config: HttpRevalidatorConfig,
    client: reqwest::Client,
}

impl HttpPathRevalidator {
    pub fn new(config: HttpRevalidatorConfig) -> Result<Self, RevalidationError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RevalidationError::Request(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl PathRevalidator for HttpPathRevalidator {
    async fn revalidate(&self, path: &str) -> Result<(), RevalidationError> {
        let mut request = self
            .client
            .post(&self.config.url)
            .json(&RevalidatePathBody { path });

        if let Some(token) = &self.config.token {
            request = request.header(REVALIDATE_TOKEN_HEADER, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RevalidationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RevalidationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(path = %path, "Path revalidated");
        Ok(())
    }
}
