//! # Identity Management Organization Model
//!
//! This crate provides the domain model shared by the permission engine and
//! the lifecycle controllers.
//!
//! ## Overview
//!
//! The idm-org crate handles:
//! - **Roles**: The fixed, totally ordered role hierarchy
//! - **Entities**: The contract every managed resource implements
//! - **Groups**: Common groups, base groups and privilege groups
//! - **Users**: Users and admins
//! - **Context**: The active actor and the focused common group
//!
//! ## Architecture
//!
//! ```text
//! SessionContext
//!   ├─ Actor (role within focused common group, global admin flag)
//!   └─ focused CommonGroup
//!         ├─ BaseGroup
//!         ├─ PrivilegeGroup
//!         └─ User
//! Admin (global)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use idm_org::{Actor, BaseGroup, Entity, Role, SessionContext};
//!
//! let ctx = SessionContext::with_actor(Actor::new("UAA00001", Role::Visitor));
//! ctx.switch_common_group("CGAA00001", Role::Contributor);
//!
//! let draft = BaseGroup::create_empty();
//! assert!(draft.is_unsaved());
//! assert!(Role::is_at_least(Role::Contributor, ctx.actor().unwrap().role));
//! ```

pub mod context;
pub mod entity;
pub mod error;
pub mod groups;
pub mod roles;
pub mod users;

// Re-export main types for convenience
pub use context::{Actor, Scope, SessionContext, SessionState};
pub use entity::{Entity, Identification, ValidityPeriod};
pub use error::{OrgError, OrgResult};
pub use groups::{BaseGroup, CommonGroup, NewGroup, PrivilegeGroup};
pub use roles::Role;
pub use users::{Admin, NewPerson, User};
