//! # Permissions
//!
//! A permission combines a resource type with an action. The
//! [`RoleRequirements`] table maps each primitive permission to the minimum
//! [`Role`] an actor must hold for it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use idm_org::Role;

use crate::actions::Action;
use crate::resources::ResourceType;

/// A permission is a combination of resource type and action.
///
/// # Example
///
/// ```
/// use idm_rbac::permissions::Permission;
/// use idm_rbac::resources::ResourceType;
/// use idm_rbac::actions::Action;
///
/// let perm = Permission::new(ResourceType::BaseGroup, Action::Create);
/// assert_eq!(perm.to_string(), "base_group:create");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Permission {
    /// The resource type this permission applies to.
    pub resource: ResourceType,
    /// The action on the resource.
    pub action: Action,
}

impl Permission {
    /// Create a new permission.
    pub fn new(resource: ResourceType, action: Action) -> Self {
        Self { resource, action }
    }

    /// Parse from string (e.g., "user:update").
    ///
    /// # Returns
    ///
    /// `Some(Permission)` if valid, `None` otherwise
    ///
    /// # Example
    ///
    /// ```
    /// use idm_rbac::permissions::Permission;
    /// use idm_rbac::resources::ResourceType;
    /// use idm_rbac::actions::Action;
    ///
    /// let perm = Permission::from_string("privilege_group:add_member").unwrap();
    /// assert_eq!(perm.resource, ResourceType::PrivilegeGroup);
    /// assert_eq!(perm.action, Action::AddMember);
    /// assert!(Permission::from_string("user").is_none());
    /// ```
    pub fn from_string(s: &str) -> Option<Self> {
        let (resource, action) = s.split_once(':')?;
        Some(Self {
            resource: ResourceType::parse(resource)?,
            action: Action::parse(action)?,
        })
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.resource.as_str(), self.action.as_str())
    }
}

/// Minimum role per primitive permission.
///
/// Permissions without an entry are denied to everyone except global admins.
///
/// # Example
///
/// ```
/// use idm_org::Role;
/// use idm_rbac::permissions::{Permission, RoleRequirements};
/// use idm_rbac::resources::ResourceType;
/// use idm_rbac::actions::Action;
///
/// let mut table = RoleRequirements::defaults();
/// let create = Permission::new(ResourceType::BaseGroup, Action::Create);
/// assert_eq!(table.required_role(&create), Some(Role::Manager));
///
/// table.set(create, Role::Contributor);
/// assert_eq!(table.required_role(&create), Some(Role::Contributor));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleRequirements {
    /// Requirements keyed by permission string.
    requirements: HashMap<String, Role>,
}

impl RoleRequirements {
    /// Create an empty table that denies every permission.
    pub fn new() -> Self {
        Self {
            requirements: HashMap::new(),
        }
    }

    /// Table with the default requirement of every primitive permission.
    pub fn defaults() -> Self {
        use Action::*;
        use ResourceType::*;

        let entries = [
            (CommonGroup, Read, Role::Visitor),
            (CommonGroup, Create, Role::Admin),
            (CommonGroup, Update, Role::Admin),
            (BaseGroup, Read, Role::Visitor),
            (BaseGroup, Create, Role::Manager),
            (BaseGroup, Update, Role::Contributor),
            (BaseGroup, AddMember, Role::Contributor),
            (PrivilegeGroup, Read, Role::Visitor),
            (PrivilegeGroup, Create, Role::Manager),
            (PrivilegeGroup, Update, Role::Manager),
            (PrivilegeGroup, AddMember, Role::Manager),
            (User, Read, Role::Visitor),
            (User, Create, Role::Manager),
            (User, Update, Role::Manager),
            (Admin, Read, Role::Admin),
            (Admin, Create, Role::Admin),
            (Admin, Update, Role::Admin),
        ];

        entries
            .into_iter()
            .map(|(resource, action, role)| (Permission::new(resource, action), role))
            .collect()
    }

    /// Set the minimum role for a permission, replacing any previous entry.
    pub fn set(&mut self, permission: Permission, role: Role) {
        self.requirements.insert(permission.to_string(), role);
    }

    /// Remove the entry for a permission.
    ///
    /// # Returns
    ///
    /// The role previously required, if any
    pub fn remove(&mut self, permission: &Permission) -> Option<Role> {
        self.requirements.remove(&permission.to_string())
    }

    /// Minimum role required for a permission.
    pub fn required_role(&self, permission: &Permission) -> Option<Role> {
        self.requirements.get(&permission.to_string()).copied()
    }

    /// Build a table from `("resource:action", "ROLE")` string pairs.
    ///
    /// Malformed pairs are skipped.
    ///
    /// # Example
    ///
    /// ```
    /// use idm_org::Role;
    /// use idm_rbac::permissions::{Permission, RoleRequirements};
    ///
    /// let table = RoleRequirements::from_strings(&[("user:read", "visitor"), ("user:fly", "admin")]);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn from_strings(pairs: &[(&str, &str)]) -> Self {
        pairs
            .iter()
            .filter_map(|(perm, role)| Some((Permission::from_string(perm)?, Role::parse(role)?)))
            .collect()
    }

    /// Merge another table into this one; entries of `other` win.
    pub fn merge(&mut self, other: &RoleRequirements) {
        for (perm, role) in &other.requirements {
            self.requirements.insert(perm.clone(), *role);
        }
    }

    /// Get all entries.
    pub fn all(&self) -> Vec<(Permission, Role)> {
        self.requirements
            .iter()
            .filter_map(|(s, role)| Permission::from_string(s).map(|p| (p, *role)))
            .collect()
    }

    /// Get the count of entries.
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl FromIterator<(Permission, Role)> for RoleRequirements {
    fn from_iter<T: IntoIterator<Item = (Permission, Role)>>(iter: T) -> Self {
        let mut table = RoleRequirements::new();
        for (perm, role) in iter {
            table.set(perm, role);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_display() {
        let perm = Permission::new(ResourceType::User, Action::SetRole);
        assert_eq!(perm.to_string(), "user:set_role");
    }

    #[test]
    fn test_permission_parsing() {
        let perm = Permission::from_string("common_group:update").unwrap();
        assert_eq!(perm.resource, ResourceType::CommonGroup);
        assert_eq!(perm.action, Action::Update);

        assert!(Permission::from_string("common_group").is_none());
        assert!(Permission::from_string("project:update").is_none());
        assert!(Permission::from_string("user:fly").is_none());
    }

    #[test]
    fn test_defaults_cover_primitive_permissions_only() {
        let table = RoleRequirements::defaults();
        assert_eq!(table.len(), 17);

        // derived actions delegate and never have their own entry
        for resource in ResourceType::all() {
            assert!(table.required_role(&Permission::new(resource, Action::Delete)).is_none());
            assert!(table
                .required_role(&Permission::new(resource, Action::RemoveMember))
                .is_none());
            assert!(table
                .required_role(&Permission::new(resource, Action::CountMembers))
                .is_none());
        }
    }

    #[test]
    fn test_set_and_remove() {
        let mut table = RoleRequirements::new();
        let perm = Permission::new(ResourceType::Admin, Action::Read);
        assert!(table.is_empty());

        table.set(perm, Role::Manager);
        assert_eq!(table.required_role(&perm), Some(Role::Manager));

        assert_eq!(table.remove(&perm), Some(Role::Manager));
        assert!(table.required_role(&perm).is_none());
    }

    #[test]
    fn test_from_strings_skips_malformed() {
        let table = RoleRequirements::from_strings(&[
            ("base_group:create", "CONTRIBUTOR"),
            ("base_group:create_all", "ADMIN"),
            ("base_group:update", "owner"),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.required_role(&Permission::new(ResourceType::BaseGroup, Action::Create)),
            Some(Role::Contributor)
        );
    }

    #[test]
    fn test_merge_overrides() {
        let mut table = RoleRequirements::defaults();
        let overrides =
            RoleRequirements::from_strings(&[("user:create", "ADMIN"), ("user:history", "MANAGER")]);
        table.merge(&overrides);

        assert_eq!(
            table.required_role(&Permission::new(ResourceType::User, Action::Create)),
            Some(Role::Admin)
        );
        assert_eq!(
            table.required_role(&Permission::new(ResourceType::User, Action::History)),
            Some(Role::Manager)
        );
        assert_eq!(table.len(), 18);
    }

    #[test]
    fn test_all_entries() {
        let table = RoleRequirements::defaults();
        let all = table.all();
        assert_eq!(all.len(), table.len());
        assert!(all.contains(&(Permission::new(ResourceType::Admin, Action::Create), Role::Admin)));
    }
}
