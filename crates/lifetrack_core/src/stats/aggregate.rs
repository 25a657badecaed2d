//! Statistics aggregation functions.
//!
//! # Responsibility
//! - Derive category breakdowns, rates, rankings, time windows and the
//!   completion streak from an entity snapshot.
//!
//! # Invariants
//! - Breakdown and rates are computed over non-archived entities only.
//! - Per-category counts sum to the non-archived total; percentages sum to
//!   ~100 when the total is positive and are 0 when it is 0.
//! - `now` is always an explicit parameter so results are deterministic.

use crate::model::category::CategoryName;
use crate::model::entity::Entity;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One row of the category breakdown.
///
/// `category = None` is the uncategorized bucket, so counts always sum to
/// the non-archived total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    pub category: Option<CategoryName>,
    pub count: usize,
    /// `count / total * 100`; 0 when the total is 0.
    pub percentage: f64,
}

/// Entities created inside the trailing time windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WindowCounts {
    /// Created within the trailing 7 days (closed range against `now`).
    pub this_week: usize,
    /// Created within the same calendar month and year as `now`.
    pub this_month: usize,
}

/// Summary bundle published alongside every projection snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    /// Non-archived entity count.
    pub total: usize,
    pub completed: usize,
    pub favorites: usize,
    pub completion_rate: f64,
    pub favorite_rate: f64,
    pub windows: WindowCounts,
    pub categories: Vec<CategoryStat>,
    pub streak_days: u32,
}

/// Computes the full summary for one snapshot.
pub fn summarize(entities: &[Entity], now: DateTime<Utc>) -> StatsSummary {
    let active: Vec<&Entity> = entities.iter().filter(|e| e.is_active()).collect();
    let total = active.len();
    let completed = active.iter().filter(|e| e.is_completed).count();
    let favorites = active.iter().filter(|e| e.is_favorite).count();

    StatsSummary {
        total,
        completed,
        favorites,
        completion_rate: rate(completed, total),
        favorite_rate: rate(favorites, total),
        windows: window_counts(entities, now),
        categories: category_breakdown(entities),
        streak_days: completion_streak(entities, now),
    }
}

/// Per-category counts and percentages over non-archived entities.
///
/// Rows are sorted with the uncategorized bucket first, then by name.
pub fn category_breakdown(entities: &[Entity]) -> Vec<CategoryStat> {
    let mut counts: BTreeMap<Option<CategoryName>, usize> = BTreeMap::new();
    let mut total = 0usize;
    for entity in entities.iter().filter(|e| e.is_active()) {
        *counts.entry(entity.category.clone()).or_insert(0) += 1;
        total += 1;
    }

    counts
        .into_iter()
        .map(|(category, count)| CategoryStat {
            category,
            count,
            percentage: rate(count, total) * 100.0,
        })
        .collect()
}

/// Counts entities created within the trailing week and current month.
pub fn window_counts(entities: &[Entity], now: DateTime<Utc>) -> WindowCounts {
    let now_ms = now.timestamp_millis();
    let week_start_ms = (now - Duration::days(7)).timestamp_millis();

    let mut windows = WindowCounts::default();
    for entity in entities {
        if entity.created_at >= week_start_ms && entity.created_at <= now_ms {
            windows.this_week += 1;
        }
        if let Some(created) = Utc.timestamp_millis_opt(entity.created_at).single() {
            if created.year() == now.year() && created.month() == now.month() {
                windows.this_month += 1;
            }
        }
    }
    windows
}

/// Top `n` entities by usage counter, ties broken by earliest `created_at`.
pub fn top_by_usage(entities: &[Entity], n: usize) -> Vec<Entity> {
    top_by(entities, n, |entity| entity.usage_count)
}

/// Top `n` entities by rating, ties broken by earliest `created_at`.
///
/// Unrated entities rank below every rated one.
pub fn top_by_rating(entities: &[Entity], n: usize) -> Vec<Entity> {
    top_by(entities, n, |entity| u32::from(entity.rating.unwrap_or(0)))
}

/// Consecutive calendar days with at least one completion, walking backward
/// from today (UTC). A day with zero completions breaks the streak, so an
/// empty today yields 0.
pub fn completion_streak(entities: &[Entity], now: DateTime<Utc>) -> u32 {
    let completion_days: BTreeSet<NaiveDate> = entities
        .iter()
        .filter_map(|entity| entity.completed_at)
        .filter_map(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|at| at.date_naive())
        .collect();

    let mut streak = 0u32;
    let mut day = now.date_naive();
    while completion_days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}

fn top_by(entities: &[Entity], n: usize, score: impl Fn(&Entity) -> u32) -> Vec<Entity> {
    let mut ranked: Vec<Entity> = entities.iter().filter(|e| e.is_active()).cloned().collect();
    ranked.sort_by(|a, b| {
        score(b)
            .cmp(&score(a))
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
    ranked.truncate(n);
    ranked
}

fn rate(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
