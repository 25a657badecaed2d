//! Reactive entity store.
//!
//! # Responsibility
//! - Own the canonical collection and the category registry.
//! - Apply mutations with write-through persistence and publish the
//!   filtered/sorted projection to subscribers.
//!
//! # Invariants
//! - Single-threaded: no locking, all calls on one logical thread.
//! - Every successful mutation notifies subscribers exactly once, in the
//!   order mutations were applied, with no coalescing.
//! - Persistence is fail-open: a failed save surfaces as an error while the
//!   in-memory mutation stays applied.

use crate::gateway::PersistenceGateway;
use crate::model::category::{CategoryError, CategoryName, CategoryRegistry};
use crate::model::entity::{Entity, EntityId, EntityValidationError, RATING_MAX, RATING_MIN};
use crate::query::filter::{apply_filter, FilterSpec};
use crate::query::sort::{apply_sort, SortKey};
use crate::stats::aggregate::{summarize, StatsSummary};
use crate::store::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use log::{error, info};
use uuid::Uuid;

/// Immutable view published to subscribers after each mutation.
///
/// Subscribers must not retain references across mutations; a snapshot may
/// become stale but is never corrupted.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    /// Filtered and sorted projection of the collection.
    pub projection: Vec<Entity>,
    /// Statistics recomputed from the full collection.
    pub stats: StatsSummary,
}

/// Handle returned by `subscribe`, used to unsubscribe later.
pub type SubscriberId = u64;

type Observer = Box<dyn Fn(&StoreSnapshot)>;

/// Authoritative in-memory collection with write-through persistence.
///
/// Constructed once at startup and passed by reference to consumers; there
/// is no ambient global instance, so tests build isolated stores freely.
pub struct EntityStore {
    entities: Vec<Entity>,
    categories: CategoryRegistry,
    gateway: Box<dyn PersistenceGateway>,
    filter: FilterSpec,
    sort: SortKey,
    projection: Vec<Entity>,
    subscribers: Vec<(SubscriberId, Observer)>,
    next_subscriber_id: SubscriberId,
}

impl EntityStore {
    /// Builds a store over the given gateway, loading any saved collection.
    ///
    /// The category registry is seeded from category references found in the
    /// loaded entities.
    pub fn new(gateway: Box<dyn PersistenceGateway>) -> StoreResult<Self> {
        let entities = gateway.load()?;
        let mut categories = CategoryRegistry::new();
        for entity in &entities {
            if let Some(name) = entity.category.as_ref() {
                categories.ensure(name);
            }
        }

        let mut store = Self {
            entities,
            categories,
            gateway,
            filter: FilterSpec::default(),
            sort: SortKey::default(),
            projection: Vec::new(),
            subscribers: Vec::new(),
            next_subscriber_id: 1,
        };
        store.refresh_projection();
        info!(
            "event=store_init module=store status=ok entities={} categories={}",
            store.entities.len(),
            store.categories.len()
        );
        Ok(store)
    }

    // ---- collection reads -------------------------------------------------

    /// Full collection in insertion order, archived entities included.
    pub fn all(&self) -> &[Entity] {
        &self.entities
    }

    /// Cached filtered+sorted projection.
    pub fn projection(&self) -> &[Entity] {
        &self.projection
    }

    /// Looks up one entity by id.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    /// On-demand statistics over the full collection.
    pub fn statistics(&self, now: DateTime<Utc>) -> StatsSummary {
        summarize(&self.entities, now)
    }

    // ---- mutations --------------------------------------------------------

    /// Appends one entity, assigning identity when absent.
    ///
    /// An unknown category name carried by the entity is registered as a
    /// side effect. Returns the stored entity.
    pub fn add(&mut self, mut entity: Entity) -> StoreResult<Entity> {
        entity.validate()?;
        if entity.id.is_nil() {
            entity.id = Uuid::new_v4();
        }
        if let Some(name) = entity.category.as_ref() {
            self.categories.ensure(name);
        }

        self.entities.push(entity.clone());
        info!("event=entity_add module=store status=ok id={}", entity.id);
        self.commit().map(|()| entity)
    }

    /// Replaces the stored record wholesale; no partial-field merge.
    ///
    /// `created_at` of the stored record is preserved.
    pub fn update(&mut self, entity: Entity) -> StoreResult<Entity> {
        entity.validate()?;
        let Some(index) = self.entities.iter().position(|e| e.id == entity.id) else {
            return Err(StoreError::NotFound(entity.id));
        };

        let mut replacement = entity;
        replacement.created_at = self.entities[index].created_at;
        if let Some(name) = replacement.category.as_ref() {
            self.categories.ensure(name);
        }

        self.entities[index] = replacement.clone();
        info!(
            "event=entity_update module=store status=ok id={}",
            replacement.id
        );
        self.commit().map(|()| replacement)
    }

    /// Removes one entity permanently. No-op when the id is absent.
    pub fn delete(&mut self, id: EntityId) -> StoreResult<()> {
        let before = self.entities.len();
        self.entities.retain(|entity| entity.id != id);
        if self.entities.len() == before {
            return Ok(());
        }

        info!("event=entity_delete module=store status=ok id={id}");
        self.commit()
    }

    /// Toggles the archived flag.
    pub fn archive(&mut self, id: EntityId) -> StoreResult<Entity> {
        self.mutate(id, |entity| entity.toggle_archived())
    }

    /// Clears the archived flag. No-op for an already active entity.
    pub fn restore(&mut self, id: EntityId) -> StoreResult<Entity> {
        let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) else {
            return Err(StoreError::NotFound(id));
        };
        if !entity.is_archived {
            return Ok(entity.clone());
        }

        entity.is_archived = false;
        let restored = entity.clone();
        self.commit().map(|()| restored)
    }

    /// Toggles the favorite flag.
    pub fn toggle_favorite(&mut self, id: EntityId) -> StoreResult<Entity> {
        self.mutate(id, |entity| entity.toggle_favorite())
    }

    /// Toggles the completed flag, maintaining `completed_at`.
    pub fn toggle_completed(&mut self, id: EntityId) -> StoreResult<Entity> {
        let now_ms = Utc::now().timestamp_millis();
        self.mutate(id, |entity| entity.toggle_completed(now_ms))
    }

    /// Bumps the usage counter (saturating).
    pub fn record_usage(&mut self, id: EntityId) -> StoreResult<Entity> {
        self.mutate(id, |entity| {
            entity.usage_count = entity.usage_count.saturating_add(1);
        })
    }

    /// Sets the 1..=5 rating.
    pub fn rate(&mut self, id: EntityId, rating: u8) -> StoreResult<Entity> {
        if !(RATING_MIN..=RATING_MAX).contains(&rating) {
            return Err(StoreError::Validation(
                EntityValidationError::RatingOutOfRange(rating),
            ));
        }
        self.mutate(id, |entity| entity.rating = Some(rating))
    }

    // ---- view parameters --------------------------------------------------

    /// Replaces the filter parameters; recomputes and publishes, no persist.
    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
        self.refresh_projection();
        self.notify();
    }

    /// Replaces the sort key; recomputes and publishes, no persist.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.refresh_projection();
        self.notify();
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    // ---- categories -------------------------------------------------------

    /// Registers a new category name.
    pub fn add_category(&mut self, name: CategoryName) -> StoreResult<()> {
        self.categories.add(name)?;
        Ok(())
    }

    /// Known category names in sorted order.
    pub fn categories(&self) -> Vec<CategoryName> {
        self.categories.names()
    }

    /// Renames a category, cascading to every referencing entity.
    pub fn rename_category(
        &mut self,
        old: &CategoryName,
        new: CategoryName,
    ) -> StoreResult<()> {
        self.categories.rename(old, new.clone())?;

        let mut changed = false;
        for entity in &mut self.entities {
            if entity.category.as_ref() == Some(old) {
                entity.category = Some(new.clone());
                changed = true;
            }
        }

        info!(
            "event=category_rename module=store status=ok old={old} new={new} cascaded={changed}"
        );
        if changed {
            return self.commit();
        }
        Ok(())
    }

    /// Deletes a category not referenced by any non-archived entity.
    ///
    /// References held by archived entities are cleared so the deleted name
    /// cannot resurrect from the next load.
    pub fn delete_category(&mut self, name: &CategoryName) -> StoreResult<()> {
        if !self.categories.contains(name) {
            return Err(StoreError::Category(CategoryError::UnknownName(
                name.clone(),
            )));
        }
        let in_use = self
            .entities
            .iter()
            .any(|entity| entity.is_active() && entity.category.as_ref() == Some(name));
        if in_use {
            return Err(StoreError::CategoryInUse(name.clone()));
        }

        self.categories.remove(name)?;
        let mut changed = false;
        for entity in &mut self.entities {
            if entity.category.as_ref() == Some(name) {
                entity.category = None;
                changed = true;
            }
        }

        info!("event=category_delete module=store status=ok name={name}");
        if changed {
            return self.commit();
        }
        Ok(())
    }

    // ---- subscriptions ----------------------------------------------------

    /// Registers a synchronous observer; returns its handle.
    pub fn subscribe(&mut self, observer: impl Fn(&StoreSnapshot) + 'static) -> SubscriberId {
        let id = self.next_subscriber_id;
        self.next_subscriber_id += 1;
        self.subscribers.push((id, Box::new(observer)));
        id
    }

    /// Removes one observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    // ---- internals --------------------------------------------------------

    /// Write-through persist, projection refresh, synchronous notification.
    ///
    /// The save result is checked last: on failure the mutation stays
    /// applied and subscribers still observe it (fail-open).
    fn mutate(&mut self, id: EntityId, apply: impl FnOnce(&mut Entity)) -> StoreResult<Entity> {
        let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) else {
            return Err(StoreError::NotFound(id));
        };
        apply(entity);
        let updated = entity.clone();
        self.commit().map(|()| updated)
    }

    fn commit(&mut self) -> StoreResult<()> {
        let saved = self.gateway.save(&self.entities);
        self.refresh_projection();
        self.notify();

        saved.map_err(|err| {
            error!("event=collection_persist module=store status=error error={err}");
            StoreError::Persistence(err)
        })
    }

    fn refresh_projection(&mut self) {
        let mut view = apply_filter(&self.entities, &self.filter);
        apply_sort(&mut view, self.sort);
        self.projection = view;
    }

    fn notify(&self) {
        if self.subscribers.is_empty() {
            return;
        }

        let snapshot = StoreSnapshot {
            projection: self.projection.clone(),
            stats: summarize(&self.entities, Utc::now()),
        };
        for (_, observer) in &self.subscribers {
            observer(&snapshot);
        }
    }
}
