//! # Identity Management RBAC (Role-Based Access Control)
//!
//! This crate decides, for each action on a managed resource, whether the
//! currently active actor is entitled to perform it.
//!
//! ## Overview
//!
//! The idm-rbac crate handles:
//! - **Resources**: Common groups, base groups, privilege groups, users, admins
//! - **Actions**: Operations that can be performed on resources
//! - **Permissions**: Resource + Action combinations
//! - **Role Requirements**: Minimum role per primitive permission
//! - **Policies**: Named predicates per resource type
//!
//! ## Architecture
//!
//! ```text
//! Policy predicate ─→ PermissionEngine ─→ SessionContext (actor)
//!                            └──────────→ RoleRequirements (permission → role)
//!
//! Examples:
//!   "base_group:create"   MANAGER
//!   "user:update"         MANAGER
//!   "common_group:read"   VISITOR
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use idm_org::{Actor, Role, SessionContext};
//! use idm_rbac::{BaseGroupPolicy, PermissionEngine, ResourcePolicy};
//!
//! let ctx = SessionContext::with_actor(Actor::new("UAA00001", Role::Contributor));
//! let policy = BaseGroupPolicy::new(PermissionEngine::new(ctx));
//!
//! assert!(policy.is_allowed_to_update());
//! assert!(!policy.is_allowed_to_delete());
//! ```
//!
//! ## Evaluation
//!
//! - No active actor: deny
//! - Global admin: allow
//! - Otherwise: the actor's role must reach the required role

pub mod actions;
pub mod engine;
pub mod permissions;
pub mod policies;
pub mod resources;

// Re-export main types for convenience
pub use actions::Action;
pub use engine::PermissionEngine;
pub use permissions::{Permission, RoleRequirements};
pub use policies::{
    AdminPolicy, BaseGroupPolicy, CommonGroupPolicy, PrivilegeGroupPolicy, ResourcePolicy,
    UserPolicy,
};
pub use resources::ResourceType;
