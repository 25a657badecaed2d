//! Core domain logic for LifeTrack personal-tracking apps.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod query;
pub mod stats;
pub mod store;

pub use gateway::{GatewayResult, MemoryGateway, PersistenceError, PersistenceGateway, SqliteGateway};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{CategoryError, CategoryName, CategoryNameError, CategoryRegistry};
pub use model::entity::{Entity, EntityId, EntityKind, EntityValidationError};
pub use query::filter::{apply_filter, FilterSpec, FlagFilter};
pub use query::sort::{apply_sort, SortKey};
pub use stats::aggregate::{
    category_breakdown, completion_streak, summarize, top_by_rating, top_by_usage, window_counts,
    CategoryStat, StatsSummary, WindowCounts,
};
pub use store::entity_store::{EntityStore, StoreSnapshot, SubscriberId};
pub use store::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
