//! In-memory revalidator - records paths instead of calling the frontend.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::RwLock;

use beacon_core::ports::{PathRevalidator, RevalidationError};

/// Number of recent paths kept by default.
pub const DEFAULT_HISTORY: usize = 256;

/// Records the most recent revalidated paths.
///
/// Used when no revalidation hook is configured, and in tests. Only the last
/// `capacity` paths are kept.
pub struct InMemoryPathRevalidator {
    paths: RwLock<VecDeque<String>>,
    capacity: usize,
}

impl InMemoryPathRevalidator {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            paths: RwLock::new(VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY))),
            capacity,
        }
    }

    /// Recent paths, oldest first.
    pub async fn revalidated(&self) -> Vec<String> {
        self.paths.read().await.iter().cloned().collect()
    }
}

impl Default for InMemoryPathRevalidator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PathRevalidator for InMemoryPathRevalidator {
    async fn revalidate(&self, path: &str) -> Result<(), RevalidationError> {
        tracing::debug!(path = %path, "Recorded revalidation (no hook configured)");
        if self.capacity == 0 {
            return Ok(());
        }

        let mut paths = self.paths.write().await;
        if paths.len() == self.capacity {
            paths.pop_front();
        }
        paths.push_back(path.to_string());
        Ok(())
    }
}
