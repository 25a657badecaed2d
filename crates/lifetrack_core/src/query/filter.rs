//! Predicate composition for filtered views.
//!
//! # Responsibility
//! - Combine text, category and flag predicates into one effective test.
//!
//! # Invariants
//! - Absent predicates match everything; active predicates are AND-combined.
//! - Archived entities are excluded unless `include_archived` is set.
//! - Input order is preserved; this module never re-sorts.

use crate::model::category::CategoryName;
use crate::model::entity::Entity;

/// Exact-match test against one boolean flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagFilter {
    FavoritesOnly,
    CompletedOnly,
    /// Not yet completed (e.g. open home tasks).
    ActiveOnly,
}

/// Filter parameters for the current view.
///
/// `Default` is the match-all spec used by default listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Case-insensitive substring over title and note. Blank matches all.
    pub text: Option<String>,
    /// Category equality test. `None` means all categories.
    pub category: Option<CategoryName>,
    /// Optional flag predicate.
    pub flag: Option<FlagFilter>,
    /// Dedicated "show archived" mode.
    pub include_archived: bool,
}

impl FilterSpec {
    /// Returns whether one entity passes every active predicate.
    pub fn matches(&self, entity: &Entity) -> bool {
        if entity.is_archived && !self.include_archived {
            return false;
        }

        if let Some(text) = self.text.as_deref() {
            if !matches_text(entity, text) {
                return false;
            }
        }

        if let Some(category) = self.category.as_ref() {
            if entity.category.as_ref() != Some(category) {
                return false;
            }
        }

        match self.flag {
            Some(FlagFilter::FavoritesOnly) => entity.is_favorite,
            Some(FlagFilter::CompletedOnly) => entity.is_completed,
            Some(FlagFilter::ActiveOnly) => !entity.is_completed,
            None => true,
        }
    }
}

/// Applies the spec over a snapshot, preserving input order.
pub fn apply_filter(entities: &[Entity], spec: &FilterSpec) -> Vec<Entity> {
    entities
        .iter()
        .filter(|entity| spec.matches(entity))
        .cloned()
        .collect()
}

fn matches_text(entity: &Entity, text: &str) -> bool {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    if entity.title.to_lowercase().contains(&needle) {
        return true;
    }
    entity
        .note
        .as_deref()
        .is_some_and(|note| note.to_lowercase().contains(&needle))
}
