//! Filterable, sortable projection of a known collection.
//!
//! The view never owns or mutates entities; it only decides which of them are
//! visible and in what order.

use std::cmp::Ordering;

use idm_org::Entity;
use serde::{Deserialize, Serialize};

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

/// Active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// Column name understood by [`Entity::sort_value`]
    pub column: String,
    /// Direction
    pub direction: SortDirection,
}

/// Filter and sort state of a collection view.
///
/// # Example
///
/// ```
/// use idm_lifecycle::view::{CollectionView, SortDirection};
/// use idm_org::BaseGroup;
///
/// let groups = vec![BaseGroup::new("Ops"), BaseGroup::new("Dev"), BaseGroup::new("QA")];
/// let mut view = CollectionView::new();
/// view.set_sort("group_name", SortDirection::Ascending);
/// view.set_filter("  D ");
///
/// let visible: Vec<&str> = view.apply(&groups).into_iter().map(|g| g.group_name.as_str()).collect();
/// assert_eq!(visible, vec!["Dev"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionView {
    filter: String,
    sort: Option<SortKey>,
}

impl CollectionView {
    /// View showing everything in collection order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text filter. The value is trimmed and lower-cased.
    pub fn set_filter(&mut self, raw: &str) {
        self.filter = raw.trim().to_lowercase();
    }

    /// Normalized filter value, empty when unfiltered.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Sort by `column`.
    pub fn set_sort(&mut self, column: impl Into<String>, direction: SortDirection) {
        self.sort = Some(SortKey {
            column: column.into(),
            direction,
        });
    }

    /// Return to collection order.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Active sort key.
    pub fn sort(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    /// Check whether an entity passes the filter.
    pub fn matches<E: Entity>(&self, entity: &E) -> bool {
        self.filter.is_empty() || entity.filter_text().contains(&self.filter)
    }

    /// Visible entities in display order.
    ///
    /// Sorting is stable; unknown columns sort as empty values.
    pub fn apply<'a, E: Entity>(&self, entities: &'a [E]) -> Vec<&'a E> {
        let mut visible: Vec<&E> = entities.iter().filter(|e| self.matches(*e)).collect();

        if let Some(key) = &self.sort {
            visible.sort_by(|a, b| {
                let ordering = compare_column(*a, *b, &key.column);
                match key.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        visible
    }
}

fn compare_column<E: Entity>(a: &E, b: &E, column: &str) -> Ordering {
    let a = a.sort_value(column).unwrap_or_default();
    let b = b.sort_value(column).unwrap_or_default();
    a.cmp(&b)
}
