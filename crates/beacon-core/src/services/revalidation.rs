//! Executes revalidation targets against the frontend cache.

use std::sync::Arc;

use crate::domain::{RevalidationTarget, WebhookEvent, compute_targets};
use crate::ports::{PathRevalidator, RevalidationError};

/// Aggregate result of revalidating one target set.
#[derive(Debug, Clone, Default)]
pub struct RevalidationReport {
    pub revalidated: Vec<String>,
    pub failed: Vec<(String, RevalidationError)>,
}

impl RevalidationReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Invalidates every path of a [`RevalidationTarget`].
///
/// Each path is attempted independently, up to `max_attempts` times, so one
/// failing path never drops the others.
pub struct RevalidationDispatcher {
    revalidator: Arc<dyn PathRevalidator>,
    max_attempts: u32,
}

impl RevalidationDispatcher {
    pub fn new(revalidator: Arc<dyn PathRevalidator>, max_attempts: u32) -> Self {
        Self {
            revalidator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Compute the targets for `event` and revalidate all of them.
    pub async fn dispatch(&self, event: &WebhookEvent) -> RevalidationReport {
        let target = compute_targets(event);
        tracing::info!(
            content_type = %event.content_type_id,
            slug = ?event.slug(),
            paths = ?target.paths(),
            "Revalidating paths"
        );
        self.revalidate_all(&target).await
    }

    pub async fn revalidate_all(&self, target: &RevalidationTarget) -> RevalidationReport {
        let mut report = RevalidationReport::default();

        for path in target.iter() {
            match self.revalidate_with_retry(path).await {
                Ok(()) => report.revalidated.push(path.to_string()),
                Err(e) => {
                    tracing::error!(path = %path, error = %e, "Failed to revalidate path");
                    report.failed.push((path.to_string(), e));
                }
            }
        }

        report
    }

    async fn revalidate_with_retry(&self, path: &str) -> Result<(), RevalidationError> {
        let mut attempt = 1;
        loop {
            match self.revalidator.revalidate(path).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.max_attempts => {
                    tracing::warn!(path = %path, attempt, error = %e, "Revalidation failed, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
