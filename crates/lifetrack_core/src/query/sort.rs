//! Stable sort orders for projections.
//!
//! # Responsibility
//! - Order a filtered snapshot by a selectable key.
//!
//! # Invariants
//! - Sorting is stable: equal keys keep their relative input order.
//! - The default order is reverse-chronological by `created_at`.

use crate::model::entity::Entity;

/// Selectable sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first by `created_at`.
    #[default]
    CreatedDesc,
    /// Case-insensitive lexicographic by `title`.
    TitleAsc,
}

/// Sorts the snapshot in place.
///
/// `slice::sort_by` is stable, which keeps ties deterministic without an
/// explicit secondary key.
pub fn apply_sort(entities: &mut [Entity], key: SortKey) {
    match key {
        SortKey::CreatedDesc => entities.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::TitleAsc => {
            entities.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
    }
}
