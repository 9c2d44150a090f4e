//! Idempotent waitlist intake.

use std::sync::Arc;

use crate::domain::{Email, JoinOutcome, WaitlistEntry};
use crate::error::{DomainError, RepoError};
use crate::ports::WaitlistRepository;

pub struct WaitlistService {
    repo: Arc<dyn WaitlistRepository>,
}

impl WaitlistService {
    pub fn new(repo: Arc<dyn WaitlistRepository>) -> Self {
        Self { repo }
    }

    /// Add `raw_email` to the waitlist. Joining again returns the existing entry.
    pub async fn join(&self, raw_email: &str) -> Result<JoinOutcome, DomainError> {
        let email = Email::parse(raw_email)?;

        if let Some(existing) = self.repo.find_by_email(&email).await? {
            tracing::debug!(email = %email.masked(), "Email already on waitlist");
            return Ok(JoinOutcome::AlreadyJoined(existing));
        }

        match self.repo.insert(WaitlistEntry::new(email.clone())).await {
            Ok(entry) => {
                tracing::info!(email = %email.masked(), "Joined waitlist");
                Ok(JoinOutcome::Joined(entry))
            }
            // Lost a race against a concurrent signup for the same address.
            Err(RepoError::Constraint(_)) => match self.repo.find_by_email(&email).await? {
                Some(existing) => Ok(JoinOutcome::AlreadyJoined(existing)),
                None => Err(DomainError::Internal(
                    "waitlist entry vanished after constraint violation".to_string(),
                )),
            },
            Err(e) => Err(e.into()),
        }
    }

    pub async fn export_emails(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.repo.list_emails().await?)
    }
}
