//! Unified domain model for the tracked-collection apps.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep a single entity-centric shape for every domain projection
//!   (events, plants, beauty products, perfumes, home tasks, places,
//!   school subjects).
//!
//! # Invariants
//! - Every domain object is identified by a stable `EntityId`.
//! - Hiding is represented by the archive flag, not by removal; hard delete
//!   is a separate, irreversible store operation.

pub mod category;
pub mod entity;
