//! Entity domain model.
//!
//! # Responsibility
//! - Define the canonical record shared by all tracked-collection domains.
//! - Provide lifecycle helpers for flag toggles and validation.
//!
//! # Invariants
//! - `id` is stable and never reused for another entity.
//! - `title` is non-blank after trimming.
//! - `created_at` is set once at creation and never mutated.
//! - `completed_at` is `Some` exactly while `is_completed` is true.

use crate::model::category::CategoryName;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every tracked entity.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntityId = Uuid;

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// Fixed domain enumeration covering the seven tracked collections.
///
/// One entity shape serves every app; `kind` records which collection a
/// record belongs to and is closed by design (user-managed grouping lives in
/// the open `category` field instead).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Event,
    Plant,
    BeautyProduct,
    Perfume,
    HomeTask,
    Place,
    Subject,
}

/// Validation error raised before any entity write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityValidationError {
    /// `title` is empty or whitespace-only.
    BlankTitle,
    /// `rating` is outside the 1..=5 scale.
    RatingOutOfRange(u8),
}

impl Display for EntityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "entity title must not be blank"),
            Self::RatingOutOfRange(value) => write!(
                f,
                "entity rating {value} is outside {RATING_MIN}..={RATING_MAX}"
            ),
        }
    }
}

impl Error for EntityValidationError {}

/// Canonical domain record for all tracked collections.
///
/// Domain-specific scalars (`usage_count`, `rating`) are optional extras that
/// participate in statistics but not in the generic store contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable global ID used for lookups and persistence identity.
    pub id: EntityId,
    /// Fixed collection this record belongs to.
    pub kind: EntityKind,
    /// Non-blank display string.
    pub title: String,
    /// Open, user-managed category. `None` means uncategorized.
    pub category: Option<CategoryName>,
    /// Optional free text. `None` is distinct from an empty note.
    pub note: Option<String>,
    pub is_favorite: bool,
    pub is_completed: bool,
    /// Archived entities are hidden from default views but never removed.
    pub is_archived: bool,
    /// Unix epoch milliseconds, set once at creation.
    pub created_at: i64,
    /// Epoch milliseconds of the most recent completion, if any.
    pub completed_at: Option<i64>,
    /// Domain counter (e.g. perfume applications). Feeds top-N rankings.
    pub usage_count: u32,
    /// Optional 1..=5 score. Feeds top-N rankings.
    pub rating: Option<u8>,
}

impl Entity {
    /// Creates a new entity with a generated stable ID and current timestamp.
    ///
    /// # Invariants
    /// - Optional fields start as `None`, flags as `false`.
    /// - The title is stored as given; validation happens on store writes.
    pub fn new(kind: EntityKind, title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), kind, title)
    }

    /// Creates a new entity with a caller-provided stable ID.
    ///
    /// Used by load paths where identity already exists in storage.
    pub fn with_id(id: EntityId, kind: EntityKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            category: None,
            note: None,
            is_favorite: false,
            is_completed: false,
            is_archived: false,
            created_at: Utc::now().timestamp_millis(),
            completed_at: None,
            usage_count: 0,
            rating: None,
        }
    }

    /// Checks write-level invariants.
    ///
    /// # Errors
    /// - `BlankTitle` when the title trims to empty.
    /// - `RatingOutOfRange` when a rating is present but outside 1..=5.
    pub fn validate(&self) -> Result<(), EntityValidationError> {
        if self.title.trim().is_empty() {
            return Err(EntityValidationError::BlankTitle);
        }
        if let Some(rating) = self.rating {
            if !(RATING_MIN..=RATING_MAX).contains(&rating) {
                return Err(EntityValidationError::RatingOutOfRange(rating));
            }
        }
        Ok(())
    }

    /// Flips the favorite flag.
    pub fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
    }

    /// Flips the completed flag and keeps `completed_at` in sync.
    ///
    /// `now_ms` is recorded when the flag turns on and cleared when it turns
    /// off, so the streak statistic only sees real completion days.
    pub fn toggle_completed(&mut self, now_ms: i64) {
        self.is_completed = !self.is_completed;
        self.completed_at = if self.is_completed { Some(now_ms) } else { None };
    }

    /// Flips the archived flag.
    pub fn toggle_archived(&mut self) {
        self.is_archived = !self.is_archived;
    }

    /// Returns whether this entity appears in default views.
    pub fn is_active(&self) -> bool {
        !self.is_archived
    }
}
