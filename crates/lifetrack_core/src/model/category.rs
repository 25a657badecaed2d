//! User-managed category names and their registry.
//!
//! # Responsibility
//! - Validate category names once, at the type boundary.
//! - Own the open set of known names with uniqueness enforcement.
//!
//! # Invariants
//! - A `CategoryName` is never blank; surrounding whitespace is trimmed.
//! - Name identity is case-sensitive.
//! - Cascading rename and the in-use deletion guard live in the entity
//!   store, which owns the referencing entities.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validated, case-sensitive category name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

/// Name validation error raised at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryNameError {
    /// Input is empty or whitespace-only.
    Blank,
}

impl Display for CategoryNameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => write!(f, "category name must not be blank"),
        }
    }
}

impl Error for CategoryNameError {}

impl CategoryName {
    /// Creates a validated name, trimming surrounding whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, CategoryNameError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(CategoryNameError::Blank);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CategoryName {
    type Error = CategoryNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.0
    }
}

/// Registry-level errors for category management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    InvalidName(CategoryNameError),
    DuplicateName(CategoryName),
    UnknownName(CategoryName),
}

impl Display for CategoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => write!(f, "category already exists: `{name}`"),
            Self::UnknownName(name) => write!(f, "category not found: `{name}`"),
        }
    }
}

impl Error for CategoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidName(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CategoryNameError> for CategoryError {
    fn from(value: CategoryNameError) -> Self {
        Self::InvalidName(value)
    }
}

/// Open set of user-defined category names.
///
/// The registry holds names only; per-category counts are derived by the
/// statistics aggregator and never stored here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    names: BTreeSet<CategoryName>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one name.
    pub fn add(&mut self, name: CategoryName) -> Result<(), CategoryError> {
        if self.names.contains(&name) {
            return Err(CategoryError::DuplicateName(name));
        }
        self.names.insert(name);
        Ok(())
    }

    /// Registers a name if absent; no-op when already known.
    ///
    /// Used when entities arrive from storage or carry a fresh name on add.
    pub fn ensure(&mut self, name: &CategoryName) {
        if !self.names.contains(name) {
            self.names.insert(name.clone());
        }
    }

    /// Replaces `old` with `new`, keeping uniqueness.
    pub fn rename(&mut self, old: &CategoryName, new: CategoryName) -> Result<(), CategoryError> {
        if !self.names.contains(old) {
            return Err(CategoryError::UnknownName(old.clone()));
        }
        if &new != old && self.names.contains(&new) {
            return Err(CategoryError::DuplicateName(new));
        }
        self.names.remove(old);
        self.names.insert(new);
        Ok(())
    }

    /// Removes one name.
    pub fn remove(&mut self, name: &CategoryName) -> Result<(), CategoryError> {
        if !self.names.remove(name) {
            return Err(CategoryError::UnknownName(name.clone()));
        }
        Ok(())
    }

    pub fn contains(&self, name: &CategoryName) -> bool {
        self.names.contains(name)
    }

    /// Returns all known names in sorted order.
    pub fn names(&self) -> Vec<CategoryName> {
        self.names.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
