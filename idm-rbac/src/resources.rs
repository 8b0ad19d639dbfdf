//! # Resource Types
//!
//! Defines the managed resource types permissions are evaluated for.

use serde::{Deserialize, Serialize};

/// Resource types that can have role requirements assigned.
///
/// - **Global**: CommonGroup, Admin
/// - **Scoped to a common group**: BaseGroup, PrivilegeGroup, User
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Common groups (global).
    CommonGroup,
    /// Base groups within a common group.
    BaseGroup,
    /// Privilege groups within a common group.
    PrivilegeGroup,
    /// Users within a common group.
    User,
    /// Global admins.
    Admin,
}

impl ResourceType {
    /// Get the string representation of the resource type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::CommonGroup => "common_group",
            ResourceType::BaseGroup => "base_group",
            ResourceType::PrivilegeGroup => "privilege_group",
            ResourceType::User => "user",
            ResourceType::Admin => "admin",
        }
    }

    /// Get all resource types.
    pub fn all() -> Vec<Self> {
        vec![
            ResourceType::CommonGroup,
            ResourceType::BaseGroup,
            ResourceType::PrivilegeGroup,
            ResourceType::User,
            ResourceType::Admin,
        ]
    }

    /// Check if instances of this type live inside a common group.
    ///
    /// # Example
    ///
    /// ```
    /// use idm_rbac::resources::ResourceType;
    ///
    /// assert!(ResourceType::User.is_common_group_scoped());
    /// assert!(!ResourceType::CommonGroup.is_common_group_scoped());
    /// ```
    pub fn is_common_group_scoped(&self) -> bool {
        matches!(
            self,
            ResourceType::BaseGroup | ResourceType::PrivilegeGroup | ResourceType::User
        )
    }

    /// Parse resource type from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive, supports plural forms)
    ///
    /// # Example
    ///
    /// ```
    /// use idm_rbac::resources::ResourceType;
    ///
    /// assert_eq!(ResourceType::parse("base_group"), Some(ResourceType::BaseGroup));
    /// assert_eq!(ResourceType::parse("BaseGroups"), Some(ResourceType::BaseGroup));
    /// assert_eq!(ResourceType::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "common_group" | "commongroup" | "common_groups" | "commongroups" => {
                Some(ResourceType::CommonGroup)
            }
            "base_group" | "basegroup" | "base_groups" | "basegroups" => {
                Some(ResourceType::BaseGroup)
            }
            "privilege_group" | "privilegegroup" | "privilege_groups" | "privilegegroups" => {
                Some(ResourceType::PrivilegeGroup)
            }
            "user" | "users" => Some(ResourceType::User),
            "admin" | "admins" => Some(ResourceType::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
