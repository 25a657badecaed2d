use lifetrack_core::{CategoryName, Entity, EntityKind};
use serde_json::json;
use uuid::Uuid;

#[test]
fn entity_serializes_with_snake_case_kind_and_explicit_nulls() {
    let mut entity = Entity::with_id(
        Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap(),
        EntityKind::BeautyProduct,
        "Night cream",
    );
    entity.created_at = 1_700_000_000_000;
    entity.category = Some(CategoryName::new("Skincare").unwrap());

    let value = serde_json::to_value(&entity).unwrap();
    assert_eq!(value["kind"], json!("beauty_product"));
    assert_eq!(value["category"], json!("Skincare"));
    assert_eq!(value["note"], json!(null));
    assert_eq!(value["is_archived"], json!(false));
}

#[test]
fn entity_roundtrips_through_json() {
    let mut entity = Entity::new(EntityKind::Subject, "Algebra");
    entity.note = Some("exam in June".to_string());
    entity.rating = Some(3);

    let encoded = serde_json::to_string(&entity).unwrap();
    let decoded: Entity = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, entity);
}

#[test]
fn blank_category_name_fails_deserialization() {
    let result: Result<CategoryName, _> = serde_json::from_str("\"   \"");
    assert!(result.is_err());
}
