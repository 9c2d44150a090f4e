use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

const MAX_EMAIL_LEN: usize = 254;

/// A normalized, syntactically plausible email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Trim, lowercase and check the basic `local@domain.tld` shape.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let email = raw.trim().to_lowercase();

        if email.is_empty() {
            return Err(DomainError::Validation("Email is required".to_string()));
        }
        if email.len() > MAX_EMAIL_LEN {
            return Err(DomainError::Validation("Email is too long".to_string()));
        }

        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !email.chars().any(char::is_whitespace)
            }
            None => false,
        };

        if !valid {
            return Err(DomainError::Validation("Invalid email address".to_string()));
        }

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Email with the local part hidden, for logs.
    pub fn masked(&self) -> String {
        match self.0.split_once('@') {
            Some((local, domain)) if local.chars().count() > 1 => {
                let first: String = local.chars().take(1).collect();
                format!("{}***@{}", first, domain)
            }
            Some((_, domain)) => format!("***@{}", domain),
            None => "***".to_string(),
        }
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Waitlist entry - one signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

impl WaitlistEntry {
    /// Create a new entry with generated ID and timestamp.
    pub fn new(email: Email) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            created_at: Utc::now(),
        }
    }
}

/// Result of joining the waitlist. Joining twice is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinOutcome {
    Joined(WaitlistEntry),
    AlreadyJoined(WaitlistEntry),
}

impl JoinOutcome {
    pub fn entry(&self) -> &WaitlistEntry {
        match self {
            Self::Joined(entry) | Self::AlreadyJoined(entry) => entry,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::Joined(_))
    }
}
