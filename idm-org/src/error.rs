//! Error types for roles, entities and session context
//!
//! Everything here is a caller contract violation, never a user-facing
//! condition.

use thiserror::Error;

/// Organization model error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrgError {
    /// Role name outside the fixed hierarchy
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Identification was already assigned by the backend
    #[error("Identification is read-only once assigned (current: {current}, attempted: {attempted})")]
    IdentificationReadOnly {
        /// Identification currently held by the entity.
        current: String,
        /// Identification the caller tried to assign.
        attempted: String,
    },

    /// `valid_to` lies before `valid_from`
    #[error("Invalid validity period: valid_to precedes valid_from")]
    InvalidValidityPeriod,
}

/// Result type for organization model operations.
pub type OrgResult<T> = Result<T, OrgError>;

impl OrgError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            OrgError::UnknownRole(_) => "UNKNOWN_ROLE",
            OrgError::IdentificationReadOnly { .. } => "IDENTIFICATION_READ_ONLY",
            OrgError::InvalidValidityPeriod => "INVALID_VALIDITY_PERIOD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(OrgError::UnknownRole("x".into()).error_code(), "UNKNOWN_ROLE");
        assert_eq!(
            OrgError::InvalidValidityPeriod.error_code(),
            "INVALID_VALIDITY_PERIOD"
        );
    }

    #[test]
    fn test_error_display() {
        let err = OrgError::IdentificationReadOnly {
            current: "BGAA00001".into(),
            attempted: "BGAA00002".into(),
        };
        assert!(err.to_string().contains("BGAA00001"));
        assert!(err.to_string().contains("BGAA00002"));
    }
}
