//! Derived numeric summaries over entity snapshots.
//!
//! # Responsibility
//! - Compute counts, percentages, rankings and time-windowed metrics on
//!   demand from the current collection.
//!
//! # Invariants
//! - Every function is pure; nothing here is incrementally maintained.
//! - All ratios are defined as 0 when the denominator is 0.

pub mod aggregate;
