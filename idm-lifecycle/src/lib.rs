//! # Identity Management Resource Lifecycle
//!
//! One generic controller drives listing, selection, drafting, editing,
//! accepting and deleting for every managed resource type.
//!
//! ## Overview
//!
//! The idm-lifecycle crate handles:
//! - **Controller**: The selection state machine and backend reconciliation
//! - **Behavior**: Per-resource required fields, policy, scope and deep-link path
//! - **Collaborators**: Backend service, navigation and notification seams
//! - **View**: Filter and sort projection of the loaded collection
//! - **Memory**: In-memory collaborators for single-process use and tests
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use idm_lifecycle::memory::{MemoryNavigation, MemoryNotifier, MemoryResourceService};
//! use idm_lifecycle::{BaseGroupBehavior, BaseGroupController, ControllerConfig, SelectionState};
//! use idm_org::{Actor, BaseGroup, Role, SessionContext};
//! use idm_rbac::PermissionEngine;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let ctx = SessionContext::with_actor(Actor::new("UAA00001", Role::Manager));
//! ctx.switch_common_group("CGAA00001", Role::Manager);
//!
//! let mut controller = BaseGroupController::new(
//!     ctx.clone(),
//!     Arc::new(MemoryResourceService::<BaseGroup>::new()),
//!     Arc::new(BaseGroupBehavior::new(PermissionEngine::new(ctx))),
//!     Arc::new(MemoryNavigation::new()),
//!     Arc::new(MemoryNotifier::new()),
//!     ControllerConfig::default(),
//! );
//! controller.initialize().await.unwrap();
//!
//! controller.start_create().group_name = "Operations".into();
//! controller.accept().await.unwrap();
//! assert_eq!(controller.state(), SelectionState::Viewing);
//! assert_eq!(controller.collection().len(), 1);
//! # }
//! ```

pub mod behavior;
pub mod collaborators;
pub mod config;
pub mod controller;
pub mod error;
pub mod memory;
pub mod view;

// Re-export main types for convenience
pub use behavior::{
    AdminBehavior, BaseGroupBehavior, CommonGroupBehavior, PrivilegeGroupBehavior,
    ResourceBehavior, UserBehavior,
};
pub use collaborators::{Navigation, NotificationSink, ResourceService, TracingNotifier};
pub use config::{ControllerConfig, Messages};
pub use controller::{ActionOutcome, LifecycleController, SelectionState};
pub use error::{LifecycleError, LifecycleResult};
pub use view::{CollectionView, SortDirection, SortKey};

/// Controller for common groups.
pub type CommonGroupController = LifecycleController<idm_org::CommonGroup>;
/// Controller for base groups.
pub type BaseGroupController = LifecycleController<idm_org::BaseGroup>;
/// Controller for privilege groups.
pub type PrivilegeGroupController = LifecycleController<idm_org::PrivilegeGroup>;
/// Controller for users.
pub type UserController = LifecycleController<idm_org::User>;
/// Controller for admins.
pub type AdminController = LifecycleController<idm_org::Admin>;
