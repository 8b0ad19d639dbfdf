//! # Actions
//!
//! Defines the actions that can be performed on managed resources.

use serde::{Deserialize, Serialize};

/// Actions that can be performed on resources.
///
/// Only some actions carry their own role requirement. The others are
/// evaluated by delegating to another action of the same resource type, see
/// the per-resource policies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read/view resource.
    Read,

    /// Create new resource.
    Create,

    /// Update existing resource.
    Update,

    /// Delete resource.
    Delete,

    /// Add a child to the resource (sub group, base group).
    AddMember,

    /// Remove a child from the resource.
    RemoveMember,

    /// Count the children of the resource.
    CountMembers,

    /// Read the change history of the resource.
    History,

    /// Change the role carried by the resource.
    SetRole,
}

impl Action {
    /// Get the string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::AddMember => "add_member",
            Action::RemoveMember => "remove_member",
            Action::CountMembers => "count_members",
            Action::History => "history",
            Action::SetRole => "set_role",
        }
    }

    /// Parse action from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive, supports aliases)
    ///
    /// # Example
    ///
    /// ```
    /// use idm_rbac::actions::Action;
    ///
    /// assert_eq!(Action::parse("read"), Some(Action::Read));
    /// assert_eq!(Action::parse("view"), Some(Action::Read));
    /// assert_eq!(Action::parse("edit"), Some(Action::Update));
    /// assert_eq!(Action::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "read" | "view" | "get" => Some(Action::Read),
            "create" | "new" => Some(Action::Create),
            "update" | "edit" | "modify" => Some(Action::Update),
            "delete" | "destroy" => Some(Action::Delete),
            "add_member" | "add" => Some(Action::AddMember),
            "remove_member" | "remove" => Some(Action::RemoveMember),
            "count_members" | "count" => Some(Action::CountMembers),
            "history" => Some(Action::History),
            "set_role" => Some(Action::SetRole),
            _ => None,
        }
    }

    /// Get all actions.
    pub fn all() -> Vec<Self> {
        vec![
            Action::Read,
            Action::Create,
            Action::Update,
            Action::Delete,
            Action::AddMember,
            Action::RemoveMember,
            Action::CountMembers,
            Action::History,
            Action::SetRole,
        ]
    }

    /// Check if this is a read-only action.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Action::Read | Action::CountMembers | Action::History)
    }

    /// Check if this action modifies data.
    pub fn is_write(&self) -> bool {
        !self.is_read_only()
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
