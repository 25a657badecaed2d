//! Entity store orchestration layer.
//!
//! # Responsibility
//! - Own the authoritative collection and apply every mutation.
//! - Combine filter/sort/statistics into published snapshots.
//!
//! # Invariants
//! - Store operations never bypass entity validation.
//! - Errors are terminal for the single operation that raised them; the
//!   store itself stays usable after any error.

use crate::gateway::PersistenceError;
use crate::model::category::{CategoryError, CategoryName};
use crate::model::entity::{EntityId, EntityValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod entity_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Operation-level error taxonomy for the entity store.
#[derive(Debug)]
pub enum StoreError {
    /// Required field missing or out of range; collection unchanged.
    Validation(EntityValidationError),
    /// Mutation targeted a non-existent id; caller bug or stale reference.
    NotFound(EntityId),
    /// Durable write/load failure. Mutations stay applied in memory
    /// (fail-open); the divergence heals on the next successful save.
    Persistence(PersistenceError),
    /// Category registry rejection (duplicate, unknown, invalid name).
    Category(CategoryError),
    /// Category still referenced by a non-archived entity.
    CategoryInUse(CategoryName),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entity not found: {id}"),
            Self::Persistence(err) => write!(f, "{err}"),
            Self::Category(err) => write!(f, "{err}"),
            Self::CategoryInUse(name) => {
                write!(f, "category `{name}` is still in use by a non-archived entity")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::Category(err) => Some(err),
            Self::NotFound(_) | Self::CategoryInUse(_) => None,
        }
    }
}

impl From<EntityValidationError> for StoreError {
    fn from(value: EntityValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PersistenceError> for StoreError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

impl From<CategoryError> for StoreError {
    fn from(value: CategoryError) -> Self {
        Self::Category(value)
    }
}
