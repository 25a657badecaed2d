use lifetrack_core::db::open_db;
use lifetrack_core::{
    CategoryName, Entity, EntityKind, EntityStore, PersistenceError, PersistenceGateway,
    SqliteGateway,
};
use uuid::Uuid;

fn fixed_entity(id: &str, title: &str) -> Entity {
    Entity::with_id(Uuid::parse_str(id).unwrap(), EntityKind::Perfume, title)
}

#[test]
fn load_returns_empty_collection_when_no_prior_data_exists() {
    let gateway = SqliteGateway::open_in_memory().unwrap();
    assert!(gateway.load().unwrap().is_empty());
}

#[test]
fn save_then_load_roundtrips_all_fields_in_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lifetrack.db");

    let mut first = fixed_entity("00000000-0000-4000-8000-000000000001", "Iris Nobile");
    first.category = Some(CategoryName::new("Floral").unwrap());
    first.note = Some("spring favourite".to_string());
    first.is_favorite = true;
    first.usage_count = 12;
    first.rating = Some(5);
    let mut second = fixed_entity("00000000-0000-4000-8000-000000000002", "Oud Wood");
    second.is_archived = true;
    second.completed_at = Some(1_700_000_000_000);
    second.is_completed = true;

    {
        let mut gateway = SqliteGateway::open(&path).unwrap();
        gateway.save(&[first.clone(), second.clone()]).unwrap();
    }

    let reopened = SqliteGateway::open(&path).unwrap();
    let loaded = reopened.load().unwrap();
    assert_eq!(loaded, vec![first, second]);
}

#[test]
fn save_replaces_the_whole_durable_copy() {
    let mut gateway = SqliteGateway::open_in_memory().unwrap();

    let first = fixed_entity("00000000-0000-4000-8000-000000000001", "a");
    let second = fixed_entity("00000000-0000-4000-8000-000000000002", "b");
    gateway.save(&[first, second]).unwrap();

    let survivor = fixed_entity("00000000-0000-4000-8000-000000000003", "c");
    gateway.save(&[survivor.clone()]).unwrap();

    assert_eq!(gateway.load().unwrap(), vec![survivor]);
}

#[test]
fn store_reloads_its_collection_from_a_previous_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lifetrack.db");

    let added = {
        let gateway = SqliteGateway::open(&path).unwrap();
        let mut store = EntityStore::new(Box::new(gateway)).unwrap();
        let mut entity = Entity::new(EntityKind::Plant, "Monstera");
        entity.category = Some(CategoryName::new("Indoor").unwrap());
        store.add(entity).unwrap()
    };

    let gateway = SqliteGateway::open(&path).unwrap();
    let store = EntityStore::new(Box::new(gateway)).unwrap();
    assert_eq!(store.all().len(), 1);
    assert_eq!(store.all()[0].id, added.id);
    assert_eq!(
        store.categories(),
        vec![CategoryName::new("Indoor").unwrap()]
    );
}

#[test]
fn load_rejects_rows_with_invalid_kind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lifetrack.db");

    {
        let conn = open_db(&path).unwrap();
        conn.execute(
            "INSERT INTO entities (uuid, kind, title, created_at)
             VALUES ('00000000-0000-4000-8000-000000000009', 'spaceship', 'bad row', 0);",
            [],
        )
        .unwrap();
    }

    let gateway = SqliteGateway::open(&path).unwrap();
    let err = gateway.load().unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidData(_)));
}

#[test]
fn load_rejects_rows_with_blank_title() {
    let conn = lifetrack_core::db::open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO entities (uuid, kind, title, created_at)
         VALUES ('00000000-0000-4000-8000-000000000010', 'place', '   ', 0);",
        [],
    )
    .unwrap();

    let gateway = SqliteGateway::new(conn);
    let err = gateway.load().unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidData(_)));
}
