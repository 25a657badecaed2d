//! In-memory projection building blocks.
//!
//! # Responsibility
//! - Define pure filter predicates and stable sort orders over entity
//!   snapshots.
//!
//! # Invariants
//! - Filtering preserves input order; sorting is applied after filtering,
//!   never before.
//! - Both engines are pure: same input, same output.

pub mod filter;
pub mod sort;
