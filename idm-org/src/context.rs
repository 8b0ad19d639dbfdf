//! Active actor and selection context
//!
//! This module provides the [`SessionContext`] handle that tracks who is
//! currently acting and which common group is in focus. The handle is passed
//! explicitly to the permission engine and to lifecycle controllers; cloning it
//! shares the same underlying state.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// Maximum number of recently focused common groups kept in history.
const MAX_RECENT_COMMON_GROUPS: usize = 10;

/// The identity currently driving the session.
///
/// # Examples
///
/// ```
/// use idm_org::{Actor, Role};
///
/// let actor = Actor::new("UAA00001", Role::Contributor);
/// assert!(actor.satisfies(Role::Visitor));
/// assert!(!actor.satisfies(Role::Manager));
///
/// let admin = Actor::global_admin("AAA00001");
/// assert!(admin.satisfies(Role::Admin));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Identification of the signed-in user or admin
    pub identification: String,

    /// Role within the focused common group
    pub role: Role,

    /// Global admins pass every role check
    pub is_global_admin: bool,
}

impl Actor {
    /// Creates an actor holding `role` in the focused scope.
    pub fn new(identification: impl Into<String>, role: Role) -> Self {
        Self {
            identification: identification.into(),
            role,
            is_global_admin: false,
        }
    }

    /// Creates a global admin actor.
    pub fn global_admin(identification: impl Into<String>) -> Self {
        Self {
            identification: identification.into(),
            role: Role::Admin,
            is_global_admin: true,
        }
    }

    /// Check whether this actor satisfies a required role.
    pub fn satisfies(&self, required: Role) -> bool {
        self.is_global_admin || Role::is_at_least(required, self.role)
    }
}

/// Scope a resource load or create is executed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "identification", rename_all = "snake_case")]
pub enum Scope {
    /// Resources that do not belong to a common group
    Global,

    /// Resources of the given common group
    CommonGroup(String),
}

/// Snapshot of the session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Currently active actor
    pub actor: Option<Actor>,

    /// Currently focused common group
    pub focused_common_group: Option<String>,

    /// Recently focused common groups (most recent first)
    #[serde(default)]
    pub recent_common_groups: Vec<String>,

    /// Last updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            actor: None,
            focused_common_group: None,
            recent_common_groups: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

/// Shared handle on the active actor and focused common group.
///
/// Populated by an external sign-in and navigation flow, read by permission
/// policies and lifecycle controllers. After [`sign_out`](Self::sign_out) no
/// actor is active and no common group is focused.
///
/// # Examples
///
/// ```
/// use idm_org::{Actor, Role, Scope, SessionContext};
///
/// let ctx = SessionContext::new();
/// ctx.sign_in(Actor::new("UAA00001", Role::Visitor));
/// ctx.switch_common_group("CGAA00001", Role::Manager);
///
/// assert_eq!(ctx.actor().map(|a| a.role), Some(Role::Manager));
/// assert_eq!(ctx.common_group_scope(), Some(Scope::CommonGroup("CGAA00001".into())));
///
/// ctx.sign_out();
/// assert!(ctx.actor().is_none());
/// assert!(ctx.common_group_scope().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<SessionState>>,
}

impl SessionContext {
    /// Creates a context with no actor and no focus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with an actor already signed in.
    pub fn with_actor(actor: Actor) -> Self {
        let ctx = Self::new();
        ctx.sign_in(actor);
        ctx
    }

    /// Make `actor` the active actor.
    pub fn sign_in(&self, actor: Actor) {
        self.write(|state| state.actor = Some(actor));
    }

    /// Clear the actor and the focused common group.
    ///
    /// Recent history is kept so it can be offered on the next sign-in.
    pub fn sign_out(&self) {
        self.write(|state| {
            state.actor = None;
            state.focused_common_group = None;
        });
    }

    /// Focus a common group and set the actor's role within it.
    ///
    /// The role is ignored if no actor is signed in.
    pub fn switch_common_group(&self, identification: impl Into<String>, role: Role) {
        let identification = identification.into();
        self.write(|state| {
            if let Some(actor) = state.actor.as_mut() {
                actor.role = role;
            }
            state
                .recent_common_groups
                .retain(|id| *id != identification);
            state.recent_common_groups.insert(0, identification.clone());
            state.recent_common_groups.truncate(MAX_RECENT_COMMON_GROUPS);
            state.focused_common_group = Some(identification);
        });
    }

    /// Drop the focused common group without signing out.
    pub fn clear_focus(&self) {
        self.write(|state| state.focused_common_group = None);
    }

    /// Currently active actor, if any.
    pub fn actor(&self) -> Option<Actor> {
        self.read(|state| state.actor.clone())
    }

    /// Whether an actor is active.
    pub fn is_signed_in(&self) -> bool {
        self.read(|state| state.actor.is_some())
    }

    /// Identification of the focused common group.
    pub fn focused_common_group(&self) -> Option<String> {
        self.read(|state| state.focused_common_group.clone())
    }

    /// Scope for resources that live inside the focused common group.
    ///
    /// `None` when signed out or when no common group is focused.
    pub fn common_group_scope(&self) -> Option<Scope> {
        self.read(|state| match (&state.actor, &state.focused_common_group) {
            (Some(_), Some(id)) => Some(Scope::CommonGroup(id.clone())),
            _ => None,
        })
    }

    /// Scope for global resources. `None` when signed out.
    pub fn global_scope(&self) -> Option<Scope> {
        self.read(|state| state.actor.as_ref().map(|_| Scope::Global))
    }

    /// Most recently focused common groups.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of identifications to return
    pub fn recent_common_groups(&self, limit: usize) -> Vec<String> {
        self.read(|state| {
            state
                .recent_common_groups
                .iter()
                .take(limit)
                .cloned()
                .collect()
        })
    }

    /// Copy of the full session state.
    pub fn snapshot(&self) -> SessionState {
        self.read(SessionState::clone)
    }

    fn read<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write(&self, f: impl FnOnce(&mut SessionState)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
        guard.updated_at = Utc::now();
    }
}
