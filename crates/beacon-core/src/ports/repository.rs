use async_trait::async_trait;

use crate::domain::{Email, WaitlistEntry};
use crate::error::RepoError;

/// Waitlist persistence.
#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    /// Find an entry by its normalized email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<WaitlistEntry>, RepoError>;

    /// Insert a new entry. A duplicate email is a `RepoError::Constraint`.
    async fn insert(&self, entry: WaitlistEntry) -> Result<WaitlistEntry, RepoError>;

    /// All signed-up emails, oldest first.
    async fn list_emails(&self) -> Result<Vec<String>, RepoError>;
}
