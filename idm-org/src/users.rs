//! User and admin domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{sortable_time, Entity, Identification, ValidityPeriod};
use crate::error::OrgResult;
use crate::roles::Role;

/// Minimal payload for creating a user or an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,
}

impl NewPerson {
    /// Creates a person payload.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// A user belonging to a common group.
///
/// `last_login` is maintained by the backend and cannot be edited; it is only
/// set when a backend record is materialized.
///
/// # Examples
///
/// ```
/// use idm_org::{Entity, Role, User};
///
/// let mut user = User::new("Ada", "Lovelace");
/// user.role = Role::Contributor;
/// assert!(user.is_unsaved());
/// assert!(user.last_login().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend identification
    identification: Identification,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Mail address
    pub mail: Option<String>,

    /// Role within the common group
    pub role: Role,

    /// Validity interval
    #[serde(flatten)]
    pub validity: ValidityPeriod,

    /// Last successful login, maintained by the backend
    #[serde(default)]
    last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Creates an unsaved user with visitor role.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            identification: Identification::unsaved(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            mail: None,
            role: Role::Visitor,
            validity: ValidityPeriod::unbounded(),
            last_login: None,
        }
    }

    /// Attach the backend-maintained last login time.
    pub fn with_last_login(mut self, last_login: DateTime<Utc>) -> Self {
        self.last_login = Some(last_login);
        self
    }

    /// Last successful login.
    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }

    /// "First Last" display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

impl Entity for User {
    type NewFields = NewPerson;

    const KIND: &'static str = "user";

    fn identification(&self) -> &str {
        self.identification.as_str()
    }

    fn assign_identification(&mut self, identification: &str) -> OrgResult<()> {
        self.identification.assign(identification)
    }

    fn create_empty() -> Self {
        Self {
            role: Role::NotRelevant,
            ..Self::new("", "")
        }
    }

    fn new_fields(&self) -> NewPerson {
        NewPerson::new(self.first_name.clone(), self.last_name.clone())
    }

    fn from_new_fields(fields: &NewPerson) -> Self {
        Self::new(fields.first_name.clone(), fields.last_name.clone())
    }

    fn validity(&self) -> &ValidityPeriod {
        &self.validity
    }

    fn filter_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.identification,
            self.first_name,
            self.last_name,
            self.mail.as_deref().unwrap_or_default(),
            self.role.display_name()
        )
        .to_lowercase()
    }

    fn sort_value(&self, column: &str) -> Option<String> {
        match column {
            "identification" => Some(self.identification.to_string()),
            "first_name" => Some(self.first_name.to_lowercase()),
            "last_name" => Some(self.last_name.to_lowercase()),
            "mail" => Some(self.mail.clone().unwrap_or_default().to_lowercase()),
            "role" => Some(format!("{}", self.role.rank())),
            "valid_from" => Some(sortable_time(self.validity.valid_from)),
            "valid_to" => Some(sortable_time(self.validity.valid_to)),
            "last_login" => Some(sortable_time(self.last_login)),
            _ => None,
        }
    }
}

/// A global administrator account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    /// Backend identification
    identification: Identification,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Mail address
    pub mail: Option<String>,

    /// Administers every common group regardless of membership
    #[serde(default)]
    pub is_global_admin: bool,

    /// Validity interval
    #[serde(flatten)]
    pub validity: ValidityPeriod,

    /// Last successful login, maintained by the backend
    #[serde(default)]
    last_login: Option<DateTime<Utc>>,
}

impl Admin {
    /// Creates an unsaved admin.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            identification: Identification::unsaved(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            mail: None,
            is_global_admin: false,
            validity: ValidityPeriod::unbounded(),
            last_login: None,
        }
    }

    /// Attach the backend-maintained last login time.
    pub fn with_last_login(mut self, last_login: DateTime<Utc>) -> Self {
        self.last_login = Some(last_login);
        self
    }

    /// Last successful login.
    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }
}

impl Entity for Admin {
    type NewFields = NewPerson;

    const KIND: &'static str = "admin";

    fn identification(&self) -> &str {
        self.identification.as_str()
    }

    fn assign_identification(&mut self, identification: &str) -> OrgResult<()> {
        self.identification.assign(identification)
    }

    fn create_empty() -> Self {
        Self::new("", "")
    }

    fn new_fields(&self) -> NewPerson {
        NewPerson::new(self.first_name.clone(), self.last_name.clone())
    }

    fn from_new_fields(fields: &NewPerson) -> Self {
        Self::new(fields.first_name.clone(), fields.last_name.clone())
    }

    fn validity(&self) -> &ValidityPeriod {
        &self.validity
    }

    fn filter_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.identification,
            self.first_name,
            self.last_name,
            self.mail.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }

    fn sort_value(&self, column: &str) -> Option<String> {
        match column {
            "identification" => Some(self.identification.to_string()),
            "first_name" => Some(self.first_name.to_lowercase()),
            "last_name" => Some(self.last_name.to_lowercase()),
            "mail" => Some(self.mail.clone().unwrap_or_default().to_lowercase()),
            "is_global_admin" => Some(self.is_global_admin.to_string()),
            "valid_from" => Some(sortable_time(self.validity.valid_from)),
            "valid_to" => Some(sortable_time(self.validity.valid_to)),
            "last_login" => Some(sortable_time(self.last_login)),
            _ => None,
        }
    }
}
