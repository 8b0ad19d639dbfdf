//! Collaborators the lifecycle controller drives.
//!
//! - [`ResourceService`]: backend access, one per resource type
//! - [`Navigation`]: deep-link location of the current view
//! - [`NotificationSink`]: short transient user notifications

use async_trait::async_trait;
use idm_org::{Entity, Scope};
use tracing::info;

use crate::error::LifecycleResult;

/// Backend access for one resource type.
///
/// `delete` distinguishes a refusal (`Ok(false)`) from a failed request (`Err`).
#[async_trait]
pub trait ResourceService<E: Entity>: Send + Sync {
    /// Load every entity visible in `scope`.
    async fn list_all(&self, scope: &Scope) -> LifecycleResult<Vec<E>>;

    /// Create an entity from its minimal fields and return the canonical record.
    async fn create(&self, fields: &E::NewFields, scope: &Scope) -> LifecycleResult<E>;

    /// Store all fields of an existing entity and return the canonical record.
    async fn update(&self, entity: &E) -> LifecycleResult<E>;

    /// Delete by identification.
    ///
    /// # Returns
    ///
    /// `true` if deleted, `false` if the backend refused or found nothing
    async fn delete(&self, identification: &str) -> LifecycleResult<bool>;
}

/// Read access to the current location and bookmark-style replacement.
pub trait Navigation: Send + Sync {
    /// Resource identification carried by the current location, if any.
    fn resource_identifier(&self) -> Option<String>;

    /// Replace the current location without navigating.
    fn replace_location(&self, location: &str);
}

/// Fire-and-forget user notifications.
pub trait NotificationSink: Send + Sync {
    /// Show `message` with an acknowledging `action_label`.
    fn notify(&self, message: &str, action_label: &str);
}

/// Notification sink that only emits a tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, message: &str, action_label: &str) {
        info!(text = message, action_label, "User notification");
    }
}
