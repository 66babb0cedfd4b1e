//! Submission pipeline boundary
//!
//! The async operation a form session hands its values to once they pass
//! validation. Outcomes cross this boundary as values, never panics, so the
//! session can deterministically re-enable editing on failure.

use super::schemas::Role;
use super::value::FormValues;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Authenticated or newly created account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: Option<Role>,
    pub authenticated_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(email: &str, display_name: &str, role: Option<Role>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            role,
            authenticated_at: Utc::now(),
        }
    }
}

/// Successful pipeline result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitSuccess {
    pub identity: Identity,
    /// User-facing confirmation
    pub message: String,
}

/// Typed reason a submission did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitFailure {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("An account already exists for {email}")]
    Conflict { email: String },
    #[error("Network unavailable: {0}")]
    Network(String),
    #[error("Rejected by server: {0}")]
    Rejected(String),
    #[error("Malformed submission: {0}")]
    MalformedPayload(String),
}

/// Async boundary performing the actual account or login operation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionPipeline: Send + Sync {
    async fn submit(&self, values: FormValues) -> Result<SubmitSuccess, SubmitFailure>;
}
