//! Persistence gateway contract and implementations.
//!
//! # Responsibility
//! - Define the whole-collection load/save seam consumed by the entity
//!   store.
//! - Keep storage details out of store/business orchestration.
//!
//! # Invariants
//! - `save` replaces the entire durable copy; nothing is incremental.
//! - `load` returns an empty collection when no prior data exists and never
//!   treats that case as an error.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::entity::Entity;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryGateway;
pub use sqlite::SqliteGateway;

pub type GatewayResult<T> = Result<T, PersistenceError>;

/// Durable write/load failure.
#[derive(Debug)]
pub enum PersistenceError {
    Db(DbError),
    /// Persisted state does not decode into a valid entity.
    InvalidData(String),
    /// The backing medium rejected the operation.
    Unavailable(String),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entity data: {message}"),
            Self::Unavailable(message) => write!(f, "persistence unavailable: {message}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for PersistenceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Whole-collection persistence seam consumed by the entity store.
pub trait PersistenceGateway {
    /// Returns the previously saved collection, or empty when none exists.
    fn load(&self) -> GatewayResult<Vec<Entity>>;
    /// Replaces the entire durable copy with the given collection.
    fn save(&mut self, entities: &[Entity]) -> GatewayResult<()>;
}
