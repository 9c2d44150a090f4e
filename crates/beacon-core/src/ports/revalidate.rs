//! Cache revalidation port.

use async_trait::async_trait;

/// Invalidates one rendered path in the frontend's cache.
#[async_trait]
pub trait PathRevalidator: Send + Sync {
    async fn revalidate(&self, path: &str) -> Result<(), RevalidationError>;
}

/// Revalidation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RevalidationError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
