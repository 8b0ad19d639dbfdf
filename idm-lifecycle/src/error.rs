//! Error types for lifecycle controller operations
//!
//! Authorization and validation denials are not errors; they surface as
//! [`ActionOutcome::Rejected`](crate::controller::ActionOutcome::Rejected).
//! What remains is backend failure and caller contract violations.

use std::time::Duration;

use idm_org::OrgError;
use thiserror::Error;

/// Lifecycle error types.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Backend rejected or failed the request
    #[error("Backend error: {0}")]
    Backend(String),

    /// Backend has no record with this identification
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend did not answer in time
    #[error("Backend call timed out after {0:?}")]
    Timeout(Duration),

    /// Drafting a child resource without a focused common group
    #[error("No common group in focus for {0}")]
    MissingScope(&'static str),

    /// Entity contract violated (e.g. identification reassignment)
    #[error(transparent)]
    Org(#[from] OrgError),
}

/// Result type for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

impl LifecycleError {
    /// Check if this error was reported to the user via the notification sink.
    ///
    /// Contract violations are programmer errors and are never shown.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            LifecycleError::Backend(_) | LifecycleError::NotFound(_) | LifecycleError::Timeout(_)
        )
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            LifecycleError::Backend(_) => "BACKEND_ERROR",
            LifecycleError::NotFound(_) => "NOT_FOUND",
            LifecycleError::Timeout(_) => "BACKEND_TIMEOUT",
            LifecycleError::MissingScope(_) => "MISSING_SCOPE",
            LifecycleError::Org(e) => e.error_code(),
        }
    }
}
