//! Shared-secret verification for webhook and export requests.

use constant_time_eq::constant_time_eq;

/// Verification policy, chosen once at startup from optional configuration.
///
/// `Open` trusts every request. This is the documented behaviour when no
/// secret is configured, not a fallback for a missing one at call time.
#[derive(Clone, PartialEq, Eq)]
pub enum SecretVerification {
    Open,
    Secret(String),
}

impl SecretVerification {
    /// Build the policy from an optional configured secret.
    /// An empty string is treated as unset.
    pub fn from_config(secret: Option<String>) -> Self {
        match secret {
            Some(secret) if !secret.is_empty() => Self::Secret(secret),
            _ => Self::Open,
        }
    }

    /// Check a presented signature against the policy.
    pub fn verify(&self, presented: Option<&str>) -> bool {
        match self {
            Self::Open => true,
            Self::Secret(secret) => presented
                .map(|value| constant_time_eq(value.as_bytes(), secret.as_bytes()))
                .unwrap_or(false),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

// Never print the secret.
impl std::fmt::Debug for SecretVerification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Secret(_) => write!(f, "Secret(***)"),
        }
    }
}

/// Verify a signature header against an optional configured secret.
pub fn verify(signature_header: Option<&str>, configured_secret: Option<&str>) -> bool {
    SecretVerification::from_config(configured_secret.map(str::to_string)).verify(signature_header)
}
