//! In-memory waitlist repository - used when no database is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;

use beacon_core::domain::{Email, WaitlistEntry};
use beacon_core::error::RepoError;
use beacon_core::ports::WaitlistRepository;

/// Waitlist kept in a `Vec` behind an async RwLock.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryWaitlistRepository {
    entries: RwLock<Vec<WaitlistEntry>>,
}

impl InMemoryWaitlistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WaitlistRepository for InMemoryWaitlistRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<WaitlistEntry>, RepoError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().find(|e| &e.email == email).cloned())
    }

    async fn insert(&self, entry: WaitlistEntry) -> Result<WaitlistEntry, RepoError> {
        let mut entries = self.entries.write().await;
        if entries.iter().any(|e| e.email == entry.email) {
            return Err(RepoError::Constraint("email already on waitlist".to_string()));
        }
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn list_emails(&self) -> Result<Vec<String>, RepoError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().map(|e| e.email.to_string()).collect())
    }
}
