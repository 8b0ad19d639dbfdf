//! # Permission Engine
//!
//! Evaluates a primitive permission against the active actor:
//!
//! 1. no active actor: deny
//! 2. actor is a global admin: allow
//! 3. otherwise: allow iff the actor's role reaches the required role
//!
//! The engine never fails. A permission without a role requirement is denied
//! to everyone but global admins.

use std::sync::Arc;

use idm_org::{Role, SessionContext};
use tracing::debug;

use crate::actions::Action;
use crate::permissions::{Permission, RoleRequirements};
use crate::resources::ResourceType;

/// Role-hierarchy permission engine bound to a session.
///
/// Cloning is cheap; clones share the session and the requirement table.
///
/// # Example
///
/// ```
/// use idm_org::{Actor, Role, SessionContext};
/// use idm_rbac::{Action, PermissionEngine, ResourceType};
///
/// let ctx = SessionContext::with_actor(Actor::new("UAA00001", Role::Visitor));
/// let engine = PermissionEngine::new(ctx.clone());
///
/// assert!(engine.is_allowed(ResourceType::User, Action::Read));
/// assert!(!engine.is_allowed(ResourceType::User, Action::Create));
///
/// ctx.sign_out();
/// assert!(!engine.is_allowed(ResourceType::User, Action::Read));
/// ```
#[derive(Debug, Clone)]
pub struct PermissionEngine {
    context: SessionContext,
    requirements: Arc<RoleRequirements>,
}

impl PermissionEngine {
    /// Engine using the default requirement table.
    pub fn new(context: SessionContext) -> Self {
        Self::with_requirements(context, RoleRequirements::defaults())
    }

    /// Engine using a custom requirement table.
    pub fn with_requirements(context: SessionContext, requirements: RoleRequirements) -> Self {
        Self {
            context,
            requirements: Arc::new(requirements),
        }
    }

    /// Session this engine reads the actor from.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Requirement table in use.
    pub fn requirements(&self) -> &RoleRequirements {
        &self.requirements
    }

    /// Check whether the active actor may perform `action` on `resource`.
    pub fn is_allowed(&self, resource: ResourceType, action: Action) -> bool {
        self.check(&Permission::new(resource, action))
    }

    /// Check a primitive permission against the active actor.
    pub fn check(&self, permission: &Permission) -> bool {
        let Some(actor) = self.context.actor() else {
            debug!(permission = %permission, "Denied: no active actor");
            return false;
        };
        if actor.is_global_admin {
            return true;
        }
        let Some(required) = self.requirements.required_role(permission) else {
            debug!(permission = %permission, "Denied: no role requirement defined");
            return false;
        };

        let allowed = Role::is_at_least(required, actor.role);
        if !allowed {
            debug!(
                permission = %permission,
                required = %required,
                actual = %actor.role,
                actor = %actor.identification,
                "Denied: role too low"
            );
        }
        allowed
    }
}
