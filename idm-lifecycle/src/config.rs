//! Controller configuration.
//!
//! Holds the backend timeout and the texts shown through the notification
//! sink. Configuration is loaded from environment variables with defaults
//! suitable for local development.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration shared by all lifecycle controllers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Timeout around every backend call in seconds, `None` waits forever.
    pub backend_timeout_secs: Option<u64>,

    /// Action label passed along with every notification.
    pub action_label: String,

    /// Notification texts.
    pub messages: Messages,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            backend_timeout_secs: None,
            action_label: "OK".to_string(),
            messages: Messages::default(),
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `IDM_BACKEND_TIMEOUT_SECS`: Timeout for backend calls (default: none)
    /// - `IDM_NOTIFY_ACTION_LABEL`: Notification action label (default: OK)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            backend_timeout_secs: std::env::var("IDM_BACKEND_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs| *secs > 0),
            action_label: std::env::var("IDM_NOTIFY_ACTION_LABEL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(default.action_label),
            messages: default.messages,
        }
    }

    /// Backend timeout as a Duration.
    pub fn timeout(&self) -> Option<Duration> {
        self.backend_timeout_secs.map(Duration::from_secs)
    }
}

/// Texts shown to the user through the notification sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Messages {
    /// Accept blocked by missing fields, an unmodified edit, or authorization.
    pub accept_rejected: String,

    /// Delete blocked by a draft or authorization.
    pub delete_rejected: String,

    /// Backend answered that nothing was deleted.
    pub delete_refused: String,

    /// Backend call failed or timed out.
    pub backend_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            accept_rejected: "Not allowed to save, or required fields are missing".to_string(),
            delete_rejected: "Not allowed to delete".to_string(),
            delete_refused: "The entry was not deleted".to_string(),
            backend_failed: "The request could not be completed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ControllerConfig::default();
        assert!(config.backend_timeout_secs.is_none());
        assert!(config.timeout().is_none());
        assert_eq!(config.action_label, "OK");
    }

    #[test]
    fn test_timeout_duration() {
        let config = ControllerConfig {
            backend_timeout_secs: Some(5),
            ..ControllerConfig::default()
        };
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_messages_are_not_empty() {
        let messages = Messages::default();
        assert!(!messages.accept_rejected.is_empty());
        assert!(!messages.delete_rejected.is_empty());
        assert!(!messages.delete_refused.is_empty());
        assert!(!messages.backend_failed.is_empty());
    }
}
