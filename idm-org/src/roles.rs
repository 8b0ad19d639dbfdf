//! Role hierarchy
//!
//! This module defines the fixed, totally ordered set of roles an actor can
//! hold within a common group, along with the rank comparisons the permission
//! engine is built on.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OrgError;

/// Role of an actor within a common group.
///
/// Roles are hierarchical, with each role inheriting the permissions of lower roles.
/// The hierarchy is: NotRelevant < Blocked < Visitor < Contributor < Manager < Admin
///
/// Comparison is by rank, never by name. The global admin flag carried by an
/// [`Actor`](crate::context::Actor) is orthogonal to this order and is not a role.
///
/// # Permission Model
///
/// - **NotRelevant**: No role in the scope at all
/// - **Blocked**: Member whose access is suspended
/// - **Visitor**: Read-only access
/// - **Contributor**: Can edit group content and memberships
/// - **Manager**: Can create and delete resources
/// - **Admin**: Can manage common groups and admins
///
/// # Examples
///
/// ```
/// use idm_org::Role;
///
/// assert!(Role::is_at_least(Role::Contributor, Role::Manager));
/// assert!(!Role::is_at_least(Role::Manager, Role::Visitor));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// No role within the scope
    NotRelevant = 0,

    /// Membership exists but is suspended
    Blocked = 1,

    /// Read-only access
    Visitor = 2,

    /// Can edit content
    Contributor = 3,

    /// Can create and delete resources
    Manager = 4,

    /// Full control of the scope
    Admin = 5,
}

impl Role {
    /// All roles, lowest rank first.
    pub fn all() -> [Role; 6] {
        [
            Role::NotRelevant,
            Role::Blocked,
            Role::Visitor,
            Role::Contributor,
            Role::Manager,
            Role::Admin,
        ]
    }

    /// Position of this role in the hierarchy.
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Compare two roles by rank.
    pub fn compare_rank(a: Role, b: Role) -> Ordering {
        a.rank().cmp(&b.rank())
    }

    /// Check whether `actual` reaches the rank of `required`.
    ///
    /// # Arguments
    ///
    /// * `required` - The minimum role an action demands
    /// * `actual` - The role the actor holds
    ///
    /// # Returns
    ///
    /// `true` iff rank(actual) >= rank(required)
    pub fn is_at_least(required: Role, actual: Role) -> bool {
        Self::compare_rank(actual, required) != Ordering::Less
    }

    /// Check if this role may be assigned to a user.
    ///
    /// # Returns
    ///
    /// `false` only for NotRelevant
    pub fn is_assignable(&self) -> bool {
        *self != Role::NotRelevant
    }

    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive, `-` and `_` interchangeable)
    ///
    /// # Returns
    ///
    /// `Some(Role)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use idm_org::Role;
    ///
    /// assert_eq!(Role::parse("manager"), Some(Role::Manager));
    /// assert_eq!(Role::parse("NOT_RELEVANT"), Some(Role::NotRelevant));
    /// assert_eq!(Role::parse("owner"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "not_relevant" => Some(Self::NotRelevant),
            "blocked" => Some(Self::Blocked),
            "visitor" => Some(Self::Visitor),
            "contributor" => Some(Self::Contributor),
            "manager" => Some(Self::Manager),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Get string representation of the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use idm_org::Role;
    ///
    /// assert_eq!(Role::Contributor.as_str(), "CONTRIBUTOR");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotRelevant => "NOT_RELEVANT",
            Self::Blocked => "BLOCKED",
            Self::Visitor => "VISITOR",
            Self::Contributor => "CONTRIBUTOR",
            Self::Manager => "MANAGER",
            Self::Admin => "ADMIN",
        }
    }

    /// Get a human-readable display name for the role.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::NotRelevant => "Not relevant",
            Self::Blocked => "Blocked",
            Self::Visitor => "Visitor",
            Self::Contributor => "Contributor",
            Self::Manager => "Manager",
            Self::Admin => "Admin",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::NotRelevant
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = OrgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| OrgError::UnknownRole(s.to_string()))
    }
}
