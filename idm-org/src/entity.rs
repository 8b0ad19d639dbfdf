//! Entity contract shared by every managed resource type
//!
//! A managed entity has a stable string identification (empty while unsaved),
//! structural equality over all of its fields, an empty placeholder
//! constructor, and a minimal payload the backend accepts on creation.

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{OrgError, OrgResult};

/// Backend-assigned identification of a managed entity.
///
/// The empty string is reserved for entities that have not been saved yet.
/// Once a non-empty value is assigned it cannot be replaced.
///
/// # Examples
///
/// ```
/// use idm_org::Identification;
///
/// let mut id = Identification::unsaved();
/// assert!(id.is_unsaved());
///
/// id.assign("UAA00001").unwrap();
/// assert_eq!(id.as_str(), "UAA00001");
/// assert!(id.assign("UAA00002").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identification(String);

impl Identification {
    /// Placeholder identification of an unsaved entity.
    pub fn unsaved() -> Self {
        Self(String::new())
    }

    /// Identification as handed out by the backend.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw identification string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identification is the unsaved placeholder.
    pub fn is_unsaved(&self) -> bool {
        self.0.is_empty()
    }

    /// Assign a backend identification.
    ///
    /// Assigning the value already held is a no-op.
    ///
    /// # Errors
    ///
    /// `OrgError::IdentificationReadOnly` if a different value is already assigned.
    pub fn assign(&mut self, value: &str) -> OrgResult<()> {
        if self.0 == value {
            return Ok(());
        }
        if !self.is_unsaved() {
            return Err(OrgError::IdentificationReadOnly {
                current: self.0.clone(),
                attempted: value.to_string(),
            });
        }
        self.0 = value.to_string();
        Ok(())
    }
}

impl std::fmt::Display for Identification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Interval in which an entity is valid. Open ends are unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityPeriod {
    /// Start of validity (inclusive)
    pub valid_from: Option<DateTime<Utc>>,

    /// End of validity (inclusive)
    pub valid_to: Option<DateTime<Utc>>,
}

impl ValidityPeriod {
    /// Creates a validity period, rejecting inverted intervals.
    ///
    /// # Errors
    ///
    /// `OrgError::InvalidValidityPeriod` if `valid_to` is before `valid_from`.
    pub fn new(
        valid_from: Option<DateTime<Utc>>,
        valid_to: Option<DateTime<Utc>>,
    ) -> OrgResult<Self> {
        let period = Self {
            valid_from,
            valid_to,
        };
        period.validate()?;
        Ok(period)
    }

    /// A validity period without bounds.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Check that the interval is not inverted.
    pub fn validate(&self) -> OrgResult<()> {
        match (self.valid_from, self.valid_to) {
            (Some(from), Some(to)) if to < from => Err(OrgError::InvalidValidityPeriod),
            _ => Ok(()),
        }
    }

    /// Whether the given instant lies inside the interval.
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.valid_from.map_or(true, |from| from <= at) && self.valid_to.map_or(true, |to| at <= to)
    }
}

/// Capability set every managed resource type provides.
///
/// Equality is structural (`PartialEq` over all fields). Two entities with the
/// same identification but different field values are *not* equal.
pub trait Entity: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Minimal payload the backend accepts when creating an entity.
    type NewFields: Clone + Debug + Send + Sync;

    /// Resource kind used in logs and deep links (e.g. `"base_group"`).
    const KIND: &'static str;

    /// Backend identification, empty while unsaved.
    fn identification(&self) -> &str;

    /// Assign the backend identification to an unsaved entity.
    fn assign_identification(&mut self, identification: &str) -> OrgResult<()>;

    /// Unsaved placeholder with empty identification and empty fields.
    fn create_empty() -> Self;

    /// Extract the minimal create payload from this entity.
    fn new_fields(&self) -> Self::NewFields;

    /// Materialize an unsaved entity from a create payload.
    fn from_new_fields(fields: &Self::NewFields) -> Self;

    /// Validity interval of this entity.
    fn validity(&self) -> &ValidityPeriod;

    /// Lower-cased text a free-text filter is matched against.
    fn filter_text(&self) -> String;

    /// Value of a sortable column, `None` for unknown columns.
    fn sort_value(&self, column: &str) -> Option<String>;

    /// Structural equality against a possibly absent value.
    fn equals(&self, other: Option<&Self>) -> bool {
        other.is_some_and(|other| self == other)
    }

    /// Whether this entity has not been saved yet.
    fn is_unsaved(&self) -> bool {
        self.identification().is_empty()
    }

    /// Consume an unsaved entity and return it with an identification.
    fn with_identification(mut self, identification: &str) -> OrgResult<Self> {
        self.assign_identification(identification)?;
        Ok(self)
    }
}

/// Format an optional timestamp as a sortable string.
pub(crate) fn sortable_time(value: Option<DateTime<Utc>>) -> String {
    value.map(|t| t.to_rfc3339()).unwrap_or_default()
}
