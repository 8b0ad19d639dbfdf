//! Resource-specific behavior plugged into the generic controller.
//!
//! A behavior supplies what differs per resource type: the required-field
//! check, the policy consulted for accept and delete, the scope loads run
//! in, and the base path of deep links.

use idm_org::{
    Admin, BaseGroup, CommonGroup, Entity, PrivilegeGroup, Scope, SessionContext, User,
};
use idm_rbac::{
    AdminPolicy, BaseGroupPolicy, CommonGroupPolicy, PermissionEngine, PrivilegeGroupPolicy,
    ResourcePolicy, UserPolicy,
};

/// Resource-specific part of a lifecycle controller.
pub trait ResourceBehavior<E: Entity>: Send + Sync {
    /// Policy guarding this resource type.
    fn policy(&self) -> &dyn ResourcePolicy;

    /// Base path of deep links, e.g. `/basegroups`.
    fn base_path(&self) -> &str;

    /// Business-required fields are present and valid.
    fn check_required_fields(&self, entity: &E) -> bool;

    /// Scope loads and creates run in; `None` when none is available.
    fn scope(&self, context: &SessionContext) -> Option<Scope> {
        if self.policy().resource().is_common_group_scoped() {
            context.common_group_scope()
        } else {
            context.global_scope()
        }
    }

    /// Whether the active actor may store `entity`.
    fn may_save(&self, is_new: bool, _entity: &E) -> bool {
        if is_new {
            self.policy().is_allowed_to_create()
        } else {
            self.policy().is_allowed_to_update()
        }
    }

    /// Whether the active actor may delete `entity`.
    fn may_delete(&self, _entity: &E) -> bool {
        self.policy().is_allowed_to_delete()
    }
}

fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Behavior of the common group controller.
#[derive(Debug, Clone)]
pub struct CommonGroupBehavior {
    policy: CommonGroupPolicy,
}

impl CommonGroupBehavior {
    /// Creates the behavior.
    pub fn new(engine: PermissionEngine) -> Self {
        Self {
            policy: CommonGroupPolicy::new(engine),
        }
    }

    /// Policy with the resource-specific predicates.
    pub fn common_group_policy(&self) -> &CommonGroupPolicy {
        &self.policy
    }
}

impl ResourceBehavior<CommonGroup> for CommonGroupBehavior {
    fn policy(&self) -> &dyn ResourcePolicy {
        &self.policy
    }

    fn base_path(&self) -> &str {
        "/commongroups"
    }

    fn check_required_fields(&self, group: &CommonGroup) -> bool {
        is_filled(&group.group_name)
            && group.default_role.is_assignable()
            && group.validity.validate().is_ok()
    }
}

/// Behavior of the base group controller.
#[derive(Debug, Clone)]
pub struct BaseGroupBehavior {
    policy: BaseGroupPolicy,
}

impl BaseGroupBehavior {
    /// Creates the behavior.
    pub fn new(engine: PermissionEngine) -> Self {
        Self {
            policy: BaseGroupPolicy::new(engine),
        }
    }

    /// Policy with the resource-specific predicates.
    pub fn base_group_policy(&self) -> &BaseGroupPolicy {
        &self.policy
    }
}

impl ResourceBehavior<BaseGroup> for BaseGroupBehavior {
    fn policy(&self) -> &dyn ResourcePolicy {
        &self.policy
    }

    fn base_path(&self) -> &str {
        "/basegroups"
    }

    fn check_required_fields(&self, group: &BaseGroup) -> bool {
        is_filled(&group.group_name) && group.validity.validate().is_ok()
    }
}

/// Behavior of the privilege group controller.
#[derive(Debug, Clone)]
pub struct PrivilegeGroupBehavior {
    policy: PrivilegeGroupPolicy,
}

impl PrivilegeGroupBehavior {
    /// Creates the behavior.
    pub fn new(engine: PermissionEngine) -> Self {
        Self {
            policy: PrivilegeGroupPolicy::new(engine),
        }
    }

    /// Policy with the resource-specific predicates.
    pub fn privilege_group_policy(&self) -> &PrivilegeGroupPolicy {
        &self.policy
    }
}

impl ResourceBehavior<PrivilegeGroup> for PrivilegeGroupBehavior {
    fn policy(&self) -> &dyn ResourcePolicy {
        &self.policy
    }

    fn base_path(&self) -> &str {
        "/privilegegroups"
    }

    fn check_required_fields(&self, group: &PrivilegeGroup) -> bool {
        is_filled(&group.group_name)
            && group.role.is_assignable()
            && group.validity.validate().is_ok()
    }
}

/// Behavior of the user controller.
#[derive(Debug, Clone)]
pub struct UserBehavior {
    policy: UserPolicy,
}

impl UserBehavior {
    /// Creates the behavior.
    pub fn new(engine: PermissionEngine) -> Self {
        Self {
            policy: UserPolicy::new(engine),
        }
    }

    /// Policy with the resource-specific predicates.
    pub fn user_policy(&self) -> &UserPolicy {
        &self.policy
    }
}

impl ResourceBehavior<User> for UserBehavior {
    fn policy(&self) -> &dyn ResourcePolicy {
        &self.policy
    }

    fn base_path(&self) -> &str {
        "/users"
    }

    fn check_required_fields(&self, user: &User) -> bool {
        is_filled(&user.first_name)
            && is_filled(&user.last_name)
            && user.role.is_assignable()
            && user.validity.validate().is_ok()
    }
}

/// Behavior of the admin controller.
#[derive(Debug, Clone)]
pub struct AdminBehavior {
    policy: AdminPolicy,
}

impl AdminBehavior {
    /// Creates the behavior.
    pub fn new(engine: PermissionEngine) -> Self {
        Self {
            policy: AdminPolicy::new(engine),
        }
    }
}

impl ResourceBehavior<Admin> for AdminBehavior {
    fn policy(&self) -> &dyn ResourcePolicy {
        &self.policy
    }

    fn base_path(&self) -> &str {
        "/admins"
    }

    fn check_required_fields(&self, admin: &Admin) -> bool {
        is_filled(&admin.first_name)
            && is_filled(&admin.last_name)
            && admin.validity.validate().is_ok()
    }
}
