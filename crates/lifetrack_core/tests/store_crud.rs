use chrono::Utc;
use lifetrack_core::{
    CategoryName, Entity, EntityKind, EntityStore, MemoryGateway, StoreError,
};
use uuid::Uuid;

fn memory_store() -> EntityStore {
    EntityStore::new(Box::new(MemoryGateway::new())).unwrap()
}

#[test]
fn add_then_all_contains_exactly_one_matching_entity() {
    let mut store = memory_store();

    let added = store.add(Entity::new(EntityKind::Place, "Harbor walk")).unwrap();
    let matches: Vec<_> = store
        .all()
        .iter()
        .filter(|entity| entity.id == added.id)
        .collect();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].title, "Harbor walk");
}

#[test]
fn add_assigns_identity_when_absent() {
    let mut store = memory_store();

    let mut draft = Entity::new(EntityKind::Event, "Concert");
    draft.id = Uuid::nil();
    let added = store.add(draft).unwrap();

    assert!(!added.id.is_nil());
    assert_eq!(store.get(added.id).unwrap().title, "Concert");
}

#[test]
fn add_rejects_blank_title_and_leaves_collection_unchanged() {
    let mut store = memory_store();

    let err = store.add(Entity::new(EntityKind::HomeTask, "   ")).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(store.all().is_empty());
}

#[test]
fn update_replaces_record_wholesale_but_preserves_created_at() {
    let mut store = memory_store();
    let added = store.add(Entity::new(EntityKind::Perfume, "Vetiver")).unwrap();

    let mut replacement = added.clone();
    replacement.title = "Vetiver Extrait".to_string();
    replacement.note = Some("winter rotation".to_string());
    replacement.created_at = 42; // callers cannot rewrite creation time
    let updated = store.update(replacement).unwrap();

    assert_eq!(updated.title, "Vetiver Extrait");
    assert_eq!(updated.note.as_deref(), Some("winter rotation"));
    assert_eq!(updated.created_at, added.created_at);
}

#[test]
fn update_unknown_id_returns_not_found() {
    let mut store = memory_store();

    let ghost = Entity::new(EntityKind::Plant, "Monstera");
    let err = store.update(ghost.clone()).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == ghost.id));
}

#[test]
fn delete_is_idempotent_and_silent_for_unknown_ids() {
    let mut store = memory_store();
    let added = store.add(Entity::new(EntityKind::Subject, "Chemistry")).unwrap();

    store.delete(added.id).unwrap();
    store.delete(added.id).unwrap();
    store.delete(Uuid::new_v4()).unwrap();

    assert!(store.all().is_empty());
}

#[test]
fn toggling_flags_twice_restores_the_original_state() {
    let mut store = memory_store();
    let added = store.add(Entity::new(EntityKind::HomeTask, "Clean filter")).unwrap();

    store.toggle_favorite(added.id).unwrap();
    let back = store.toggle_favorite(added.id).unwrap();
    assert!(!back.is_favorite);

    store.toggle_completed(added.id).unwrap();
    let back = store.toggle_completed(added.id).unwrap();
    assert!(!back.is_completed);
    assert_eq!(back.completed_at, None);

    store.archive(added.id).unwrap();
    let back = store.archive(added.id).unwrap();
    assert!(!back.is_archived);
}

#[test]
fn toggle_on_unknown_id_returns_not_found() {
    let mut store = memory_store();

    let missing = Uuid::new_v4();
    let err = store.toggle_favorite(missing).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == missing));
}

#[test]
fn restore_clears_the_archive_flag_idempotently() {
    let mut store = memory_store();
    let added = store.add(Entity::new(EntityKind::Place, "Old cafe")).unwrap();

    store.archive(added.id).unwrap();
    let restored = store.restore(added.id).unwrap();
    assert!(!restored.is_archived);

    let again = store.restore(added.id).unwrap();
    assert!(!again.is_archived);
}

#[test]
fn record_usage_and_rate_update_domain_scalars() {
    let mut store = memory_store();
    let added = store.add(Entity::new(EntityKind::Perfume, "Iris")).unwrap();

    store.record_usage(added.id).unwrap();
    let bumped = store.record_usage(added.id).unwrap();
    assert_eq!(bumped.usage_count, 2);

    let rated = store.rate(added.id, 4).unwrap();
    assert_eq!(rated.rating, Some(4));

    let err = store.rate(added.id, 6).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.get(added.id).unwrap().rating, Some(4));
}

#[test]
fn persistence_failure_is_fail_open() {
    let mut store = EntityStore::new(Box::new(MemoryGateway::failing())).unwrap();

    let err = store.add(Entity::new(EntityKind::Event, "Kept in memory")).unwrap_err();
    assert!(matches!(err, StoreError::Persistence(_)));

    // The in-memory mutation is not rolled back and the store stays usable.
    assert_eq!(store.all().len(), 1);
    assert_eq!(store.projection().len(), 1);
}

#[test]
fn example_scenario_from_empty_store() {
    let mut store = memory_store();
    let shopping = CategoryName::new("Shopping").unwrap();
    let plumbing = CategoryName::new("Plumbing").unwrap();

    let mut bulbs = Entity::new(EntityKind::HomeTask, "Buy bulbs");
    bulbs.category = Some(shopping.clone());
    let bulbs = store.add(bulbs).unwrap();
    assert_eq!(store.all().len(), 1);

    store.toggle_completed(bulbs.id).unwrap();
    let stats = store.statistics(Utc::now());
    assert_eq!(stats.completion_rate, 1.0);

    let mut tap = Entity::new(EntityKind::HomeTask, "Fix tap");
    tap.category = Some(plumbing.clone());
    store.add(tap).unwrap();

    let stats = store.statistics(Utc::now());
    let shares: Vec<_> = stats
        .categories
        .iter()
        .map(|stat| (stat.category.clone(), stat.percentage))
        .collect();
    assert_eq!(
        shares,
        vec![(Some(plumbing), 50.0), (Some(shopping), 50.0)]
    );

    store.archive(bulbs.id).unwrap();
    let titles: Vec<_> = store
        .projection()
        .iter()
        .map(|entity| entity.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Fix tap"]);
}
