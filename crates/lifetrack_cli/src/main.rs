//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lifetrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use chrono::Utc;
use lifetrack_core::{Entity, EntityKind, EntityStore, MemoryGateway};

fn main() {
    println!("lifetrack_core version={}", lifetrack_core::core_version());

    let mut store = EntityStore::new(Box::new(MemoryGateway::new()))
        .expect("memory-backed store should always construct");
    let added = store
        .add(Entity::new(EntityKind::HomeTask, "Water the plants"))
        .expect("demo add should succeed");
    store
        .toggle_completed(added.id)
        .expect("demo toggle should succeed");

    let stats = store.statistics(Utc::now());
    println!(
        "demo store: total={} completed={} completion_rate={:.0}%",
        stats.total,
        stats.completed,
        stats.completion_rate * 100.0
    );
}
