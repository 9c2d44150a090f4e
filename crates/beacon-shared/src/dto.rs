//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to join the waitlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinWaitlistRequest {
    pub email: String,
}

/// Waitlist signup result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistJoinResponse {
    pub email: String,
    pub already_joined: bool,
}

/// Exported waitlist emails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailExportResponse {
    pub emails: Vec<String>,
    pub count: usize,
    /// RFC 3339 export time.
    pub timestamp: String,
}

/// Successful CMS webhook response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevalidateResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub revalidated: bool,
}

/// Failed CMS webhook response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookErrorResponse {
    pub error: String,
}

impl WebhookErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
