//! Group domain models
//!
//! This module provides the three group resource types:
//!
//! ```text
//! CommonGroup            (tenant-like scope, carries actor roles)
//!   ├─ PrivilegeGroup    (grants a role to its members)
//!   │     └─ BaseGroup   (assigned to privilege groups)
//!   └─ BaseGroup         (nestable, holds users)
//! ```
//!
//! Memberships between groups are managed by the backend; the models here only
//! carry the fields the lifecycle controller edits.

use serde::{Deserialize, Serialize};

use crate::entity::{sortable_time, Entity, Identification, ValidityPeriod};
use crate::error::OrgResult;
use crate::roles::Role;

/// Minimal payload for creating any kind of group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGroup {
    /// Name of the new group
    pub group_name: String,
}

impl NewGroup {
    /// Creates a group payload.
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
        }
    }
}

/// Top-level group that scopes users, base groups and privilege groups.
///
/// Actors hold their [`Role`] within a common group.
///
/// # Examples
///
/// ```
/// use idm_org::{CommonGroup, Entity, Role};
///
/// let group = CommonGroup::new("Engineering");
/// assert!(group.is_unsaved());
/// assert_eq!(group.default_role, Role::Visitor);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonGroup {
    /// Backend identification
    identification: Identification,

    /// Group name
    pub group_name: String,

    /// Optional description
    pub description: Option<String>,

    /// Role users receive when added to this group
    pub default_role: Role,

    /// Validity interval
    #[serde(flatten)]
    pub validity: ValidityPeriod,
}

impl CommonGroup {
    /// Creates an unsaved common group with visitor default role.
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            identification: Identification::unsaved(),
            group_name: group_name.into(),
            description: None,
            default_role: Role::Visitor,
            validity: ValidityPeriod::unbounded(),
        }
    }
}

impl Entity for CommonGroup {
    type NewFields = NewGroup;

    const KIND: &'static str = "common_group";

    fn identification(&self) -> &str {
        self.identification.as_str()
    }

    fn assign_identification(&mut self, identification: &str) -> OrgResult<()> {
        self.identification.assign(identification)
    }

    fn create_empty() -> Self {
        Self {
            default_role: Role::NotRelevant,
            ..Self::new("")
        }
    }

    fn new_fields(&self) -> NewGroup {
        NewGroup::new(self.group_name.clone())
    }

    fn from_new_fields(fields: &NewGroup) -> Self {
        Self::new(fields.group_name.clone())
    }

    fn validity(&self) -> &ValidityPeriod {
        &self.validity
    }

    fn filter_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.identification,
            self.group_name,
            self.description.as_deref().unwrap_or_default(),
            self.default_role.display_name()
        )
        .to_lowercase()
    }

    fn sort_value(&self, column: &str) -> Option<String> {
        match column {
            "identification" => Some(self.identification.to_string()),
            "group_name" => Some(self.group_name.to_lowercase()),
            "description" => Some(self.description.clone().unwrap_or_default().to_lowercase()),
            "default_role" => Some(format!("{}", self.default_role.rank())),
            "valid_from" => Some(sortable_time(self.validity.valid_from)),
            "valid_to" => Some(sortable_time(self.validity.valid_to)),
            _ => None,
        }
    }
}

/// Group of users that can be nested and assigned to privilege groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseGroup {
    /// Backend identification
    identification: Identification,

    /// Group name
    pub group_name: String,

    /// Optional description
    pub description: Option<String>,

    /// Validity interval
    #[serde(flatten)]
    pub validity: ValidityPeriod,
}

impl BaseGroup {
    /// Creates an unsaved base group.
    ///
    /// # Examples
    ///
    /// ```
    /// use idm_org::{BaseGroup, Entity};
    ///
    /// let group = BaseGroup::new("Backend Team").with_identification("BGAA00001").unwrap();
    /// assert_eq!(group.identification(), "BGAA00001");
    /// ```
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            identification: Identification::unsaved(),
            group_name: group_name.into(),
            description: None,
            validity: ValidityPeriod::unbounded(),
        }
    }
}

impl Entity for BaseGroup {
    type NewFields = NewGroup;

    const KIND: &'static str = "base_group";

    fn identification(&self) -> &str {
        self.identification.as_str()
    }

    fn assign_identification(&mut self, identification: &str) -> OrgResult<()> {
        self.identification.assign(identification)
    }

    fn create_empty() -> Self {
        Self::new("")
    }

    fn new_fields(&self) -> NewGroup {
        NewGroup::new(self.group_name.clone())
    }

    fn from_new_fields(fields: &NewGroup) -> Self {
        Self::new(fields.group_name.clone())
    }

    fn validity(&self) -> &ValidityPeriod {
        &self.validity
    }

    fn filter_text(&self) -> String {
        format!(
            "{} {} {}",
            self.identification,
            self.group_name,
            self.description.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }

    fn sort_value(&self, column: &str) -> Option<String> {
        match column {
            "identification" => Some(self.identification.to_string()),
            "group_name" => Some(self.group_name.to_lowercase()),
            "description" => Some(self.description.clone().unwrap_or_default().to_lowercase()),
            "valid_from" => Some(sortable_time(self.validity.valid_from)),
            "valid_to" => Some(sortable_time(self.validity.valid_to)),
            _ => None,
        }
    }
}

/// Group that grants its role to the users of its assigned base groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeGroup {
    /// Backend identification
    identification: Identification,

    /// Group name
    pub group_name: String,

    /// Optional description
    pub description: Option<String>,

    /// Role granted to members, `NotRelevant` until chosen
    pub role: Role,

    /// Validity interval
    #[serde(flatten)]
    pub validity: ValidityPeriod,
}

impl PrivilegeGroup {
    /// Creates an unsaved privilege group granting `role`.
    pub fn new(group_name: impl Into<String>, role: Role) -> Self {
        Self {
            identification: Identification::unsaved(),
            group_name: group_name.into(),
            description: None,
            role,
            validity: ValidityPeriod::unbounded(),
        }
    }
}

impl Entity for PrivilegeGroup {
    type NewFields = NewGroup;

    const KIND: &'static str = "privilege_group";

    fn identification(&self) -> &str {
        self.identification.as_str()
    }

    fn assign_identification(&mut self, identification: &str) -> OrgResult<()> {
        self.identification.assign(identification)
    }

    fn create_empty() -> Self {
        Self::new("", Role::NotRelevant)
    }

    fn new_fields(&self) -> NewGroup {
        NewGroup::new(self.group_name.clone())
    }

    fn from_new_fields(fields: &NewGroup) -> Self {
        Self::new(fields.group_name.clone(), Role::NotRelevant)
    }

    fn validity(&self) -> &ValidityPeriod {
        &self.validity
    }

    fn filter_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.identification,
            self.group_name,
            self.description.as_deref().unwrap_or_default(),
            self.role.display_name()
        )
        .to_lowercase()
    }

    fn sort_value(&self, column: &str) -> Option<String> {
        match column {
            "identification" => Some(self.identification.to_string()),
            "group_name" => Some(self.group_name.to_lowercase()),
            "description" => Some(self.description.clone().unwrap_or_default().to_lowercase()),
            "role" => Some(format!("{}", self.role.rank())),
            "valid_from" => Some(sortable_time(self.validity.valid_from)),
            "valid_to" => Some(sortable_time(self.validity.valid_to)),
            _ => None,
        }
    }
}
