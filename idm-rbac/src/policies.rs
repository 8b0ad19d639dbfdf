//! # Resource Policies
//!
//! One policy object per resource type. Each exposes named predicates; the
//! primitive ones ask the [`PermissionEngine`], the composite ones delegate to
//! a primitive predicate of the same policy.
//!
//! Delegations are fixed per resource type:
//!
//! | Resource        | Composite             | Delegates to       |
//! |-----------------|-----------------------|--------------------|
//! | all             | delete                | create             |
//! | CommonGroup     | count children        | read               |
//! | BaseGroup       | remove sub group      | add sub group      |
//! | BaseGroup       | count sub groups      | read               |
//! | BaseGroup       | history               | read               |
//! | PrivilegeGroup  | remove base group     | add base group     |
//! | PrivilegeGroup  | count base groups     | read               |
//! | User            | set role              | update             |
//! | User            | history, count users  | read               |

use crate::actions::Action;
use crate::engine::PermissionEngine;
use crate::resources::ResourceType;

/// Predicates every resource policy answers.
///
/// The lifecycle controller only needs these four; resource-specific
/// predicates are inherent methods on each policy.
pub trait ResourcePolicy: Send + Sync + std::fmt::Debug {
    /// Resource type this policy guards.
    fn resource(&self) -> ResourceType;

    /// Engine the primitive predicates are evaluated with.
    fn engine(&self) -> &PermissionEngine;

    /// Whether the active actor may view resources of this type.
    fn is_allowed_to_read(&self) -> bool {
        self.engine().is_allowed(self.resource(), Action::Read)
    }

    /// Whether the active actor may create resources of this type.
    fn is_allowed_to_create(&self) -> bool {
        self.engine().is_allowed(self.resource(), Action::Create)
    }

    /// Whether the active actor may update resources of this type.
    fn is_allowed_to_update(&self) -> bool {
        self.engine().is_allowed(self.resource(), Action::Update)
    }

    /// Deleting requires exactly what creating requires.
    fn is_allowed_to_delete(&self) -> bool {
        self.is_allowed_to_create()
    }
}

/// Policy for common groups.
#[derive(Debug, Clone)]
pub struct CommonGroupPolicy {
    engine: PermissionEngine,
}

impl CommonGroupPolicy {
    /// Creates the policy.
    pub fn new(engine: PermissionEngine) -> Self {
        Self { engine }
    }

    /// Counting users and groups of a common group requires reading it.
    pub fn is_allowed_to_count_children(&self) -> bool {
        self.is_allowed_to_read()
    }
}

impl ResourcePolicy for CommonGroupPolicy {
    fn resource(&self) -> ResourceType {
        ResourceType::CommonGroup
    }

    fn engine(&self) -> &PermissionEngine {
        &self.engine
    }
}

/// Policy for base groups.
#[derive(Debug, Clone)]
pub struct BaseGroupPolicy {
    engine: PermissionEngine,
}

impl BaseGroupPolicy {
    /// Creates the policy.
    pub fn new(engine: PermissionEngine) -> Self {
        Self { engine }
    }

    /// Whether sub groups or users may be added to a base group.
    pub fn is_allowed_to_add_sub_group(&self) -> bool {
        self.engine.is_allowed(ResourceType::BaseGroup, Action::AddMember)
    }

    /// Removing is allowed whenever adding is.
    pub fn is_allowed_to_remove_sub_group(&self) -> bool {
        self.is_allowed_to_add_sub_group()
    }

    /// Counting sub groups requires reading the parent.
    pub fn is_allowed_to_count_sub_groups(&self) -> bool {
        self.is_allowed_to_read()
    }

    /// History is visible to everyone who may read the group.
    pub fn is_allowed_to_get_history(&self) -> bool {
        self.is_allowed_to_read()
    }
}

impl ResourcePolicy for BaseGroupPolicy {
    fn resource(&self) -> ResourceType {
        ResourceType::BaseGroup
    }

    fn engine(&self) -> &PermissionEngine {
        &self.engine
    }
}

/// Policy for privilege groups.
#[derive(Debug, Clone)]
pub struct PrivilegeGroupPolicy {
    engine: PermissionEngine,
}

impl PrivilegeGroupPolicy {
    /// Creates the policy.
    pub fn new(engine: PermissionEngine) -> Self {
        Self { engine }
    }

    /// Whether base groups may be assigned to a privilege group.
    pub fn is_allowed_to_add_base_group(&self) -> bool {
        self.engine
            .is_allowed(ResourceType::PrivilegeGroup, Action::AddMember)
    }

    /// Removing is allowed whenever adding is.
    pub fn is_allowed_to_remove_base_group(&self) -> bool {
        self.is_allowed_to_add_base_group()
    }

    /// Counting assigned base groups requires reading the parent.
    pub fn is_allowed_to_count_base_groups(&self) -> bool {
        self.is_allowed_to_read()
    }
}

impl ResourcePolicy for PrivilegeGroupPolicy {
    fn resource(&self) -> ResourceType {
        ResourceType::PrivilegeGroup
    }

    fn engine(&self) -> &PermissionEngine {
        &self.engine
    }
}

/// Policy for users.
#[derive(Debug, Clone)]
pub struct UserPolicy {
    engine: PermissionEngine,
}

impl UserPolicy {
    /// Creates the policy.
    pub fn new(engine: PermissionEngine) -> Self {
        Self { engine }
    }

    /// Changing a user's role is an ordinary update.
    pub fn is_allowed_to_set_role(&self) -> bool {
        self.is_allowed_to_update()
    }

    /// History is visible to everyone who may read users.
    pub fn is_allowed_to_get_history(&self) -> bool {
        self.is_allowed_to_read()
    }

    /// Counting users requires reading them.
    pub fn is_allowed_to_count_users(&self) -> bool {
        self.is_allowed_to_read()
    }
}

impl ResourcePolicy for UserPolicy {
    fn resource(&self) -> ResourceType {
        ResourceType::User
    }

    fn engine(&self) -> &PermissionEngine {
        &self.engine
    }
}

/// Policy for admins.
#[derive(Debug, Clone)]
pub struct AdminPolicy {
    engine: PermissionEngine,
}

impl AdminPolicy {
    /// Creates the policy.
    pub fn new(engine: PermissionEngine) -> Self {
        Self { engine }
    }
}

impl ResourcePolicy for AdminPolicy {
    fn resource(&self) -> ResourceType {
        ResourceType::Admin
    }

    fn engine(&self) -> &PermissionEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{Permission, RoleRequirements};
    use idm_org::{Actor, Role, SessionContext};

    fn engine_for(role: Role) -> PermissionEngine {
        PermissionEngine::new(SessionContext::with_actor(Actor::new("UAA00001", role)))
    }

    #[test]
    fn test_delete_follows_create_for_every_policy() {
        for role in Role::all() {
            let engine = engine_for(role);
            let policies: Vec<Box<dyn ResourcePolicy>> = vec![
                Box::new(CommonGroupPolicy::new(engine.clone())),
                Box::new(BaseGroupPolicy::new(engine.clone())),
                Box::new(PrivilegeGroupPolicy::new(engine.clone())),
                Box::new(UserPolicy::new(engine.clone())),
                Box::new(AdminPolicy::new(engine.clone())),
            ];
            for policy in policies {
                assert_eq!(policy.is_allowed_to_delete(), policy.is_allowed_to_create());
            }
        }
    }

    #[test]
    fn test_base_group_defaults() {
        let contributor = BaseGroupPolicy::new(engine_for(Role::Contributor));
        assert!(contributor.is_allowed_to_read());
        assert!(contributor.is_allowed_to_update());
        assert!(contributor.is_allowed_to_add_sub_group());
        assert!(contributor.is_allowed_to_remove_sub_group());
        assert!(!contributor.is_allowed_to_create());
        assert!(!contributor.is_allowed_to_delete());

        let visitor = BaseGroupPolicy::new(engine_for(Role::Visitor));
        assert!(visitor.is_allowed_to_count_sub_groups());
        assert!(visitor.is_allowed_to_get_history());
        assert!(!visitor.is_allowed_to_update());
    }

    #[test]
    fn test_remove_sub_group_follows_add_override() {
        let mut table = RoleRequirements::defaults();
        table.set(
            Permission::new(ResourceType::BaseGroup, Action::AddMember),
            Role::Admin,
        );
        table.set(
            Permission::new(ResourceType::BaseGroup, Action::RemoveMember),
            Role::Visitor,
        );
        let ctx = SessionContext::with_actor(Actor::new("UAA00001", Role::Manager));
        let policy = BaseGroupPolicy::new(PermissionEngine::with_requirements(ctx, table));

        // the remove entry is never consulted
        assert!(!policy.is_allowed_to_add_sub_group());
        assert!(!policy.is_allowed_to_remove_sub_group());
    }

    #[test]
    fn test_privilege_group_defaults() {
        let contributor = PrivilegeGroupPolicy::new(engine_for(Role::Contributor));
        assert!(!contributor.is_allowed_to_update());
        assert!(!contributor.is_allowed_to_add_base_group());
        assert!(contributor.is_allowed_to_count_base_groups());

        let manager = PrivilegeGroupPolicy::new(engine_for(Role::Manager));
        assert!(manager.is_allowed_to_add_base_group());
        assert!(manager.is_allowed_to_remove_base_group());
        assert!(manager.is_allowed_to_delete());
    }

    #[test]
    fn test_user_defaults() {
        let visitor = UserPolicy::new(engine_for(Role::Visitor));
        assert!(visitor.is_allowed_to_read());
        assert!(visitor.is_allowed_to_get_history());
        assert!(visitor.is_allowed_to_count_users());
        assert!(!visitor.is_allowed_to_set_role());

        let manager = UserPolicy::new(engine_for(Role::Manager));
        assert!(manager.is_allowed_to_set_role());
        assert_eq!(manager.is_allowed_to_set_role(), manager.is_allowed_to_update());
    }

    #[test]
    fn test_common_group_and_admin_require_admin_role() {
        let manager = engine_for(Role::Manager);
        assert!(!CommonGroupPolicy::new(manager.clone()).is_allowed_to_create());
        assert!(CommonGroupPolicy::new(manager.clone()).is_allowed_to_count_children());
        assert!(!AdminPolicy::new(manager).is_allowed_to_read());

        let admin = engine_for(Role::Admin);
        assert!(CommonGroupPolicy::new(admin.clone()).is_allowed_to_update());
        assert!(AdminPolicy::new(admin).is_allowed_to_delete());
    }

    #[test]
    fn test_policies_deny_without_actor() {
        let engine = PermissionEngine::new(SessionContext::new());
        let user = UserPolicy::new(engine.clone());
        assert!(!user.is_allowed_to_read());
        assert!(!user.is_allowed_to_count_users());
        assert!(!CommonGroupPolicy::new(engine).is_allowed_to_count_children());
    }
}
