use std::sync::Arc;

use jbson_events::{Event, EventBus, InMemoryEventBus};
use jbson_inventory::{
    Category, DomainError, Field, InventoryConfig, InventoryEvent, InventoryStore, ItemStatus,
    QuerySpec, SortKey, validate,
};
use rust_decimal::Decimal;

#[test]
fn hammer_lifecycle_from_create_to_second_delete() {
    jbson_observability::init_pretty();
    let store = InventoryStore::new();

    let fields = validate("Hammer", "150", "12.99", "Claw hammer").unwrap();
    let k1 = store.create(fields.clone()).unwrap();

    let listed = store.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].key, k1);
    assert!(listed[0].matches_fields(&fields));

    let restocked = validate("Hammer", "140", "12.99", "Claw hammer").unwrap();
    store.update(&k1, restocked).unwrap();
    assert_eq!(store.read(&k1).unwrap().quantity, 140);

    store.delete(&k1).unwrap();
    assert!(store.list().is_empty());

    assert_eq!(store.delete(&k1).unwrap_err(), DomainError::NotFound(k1));
}

#[test]
fn invalid_form_input_never_reaches_the_store() {
    let store = InventoryStore::new();

    let err = validate("Hammer", "-1", "12.99", "").unwrap_err();
    assert_eq!(err, DomainError::InvalidFormat(Field::Quantity));
    assert_eq!(err.user_message(), "Error: Quantity must be a non-negative whole number.");

    let err = validate("   ", "1", "1", "").unwrap_err();
    assert_eq!(err.field(), Some(Field::Name));

    assert!(store.is_empty());
}

#[test]
fn search_form_flow_over_seeded_catalog() {
    let store = InventoryStore::with_seed_catalog(InventoryConfig::default()).unwrap();
    let drill = validate("Hammer Drill, 18V Kit", "0", "4200", "Cordless")
        .unwrap()
        .with_category(Category::Tools);
    let drill_key = store.create(drill).unwrap();

    let spec = QuerySpec::new("Hammer").in_stock_only(true);
    let hits = store.search(&spec).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].key.as_str(), "SKU001");

    let spec = QuerySpec::new("hammer").category(Category::Tools).sort(SortKey::Price);
    let hits = store.search(&spec).unwrap();
    let keys: Vec<_> = hits.iter().map(|i| i.key.clone()).collect();
    assert_eq!(keys, [jbson_inventory::ItemKey::new("SKU001"), drill_key.clone()]);
    assert_eq!(hits[1].unit_price, Decimal::new(4200, 0));

    store.set_status(&drill_key, ItemStatus::Discontinued).unwrap();
    let hits = store.search(&QuerySpec::new("drill")).unwrap();
    assert!(hits.is_empty());

    assert_eq!(
        store.search(&QuerySpec::new("x")).unwrap_err(),
        DomainError::InvalidFormat(Field::SearchTerm)
    );
}

#[test]
fn shared_bus_sees_activity_from_the_store() {
    let bus = Arc::new(InMemoryEventBus::<InventoryEvent>::new());
    let feed = bus.subscribe();
    let store = InventoryStore::new().with_bus(Arc::clone(&bus));

    let key = store.create(validate("Level", "12", "18.75", "").unwrap()).unwrap();
    store.delete(&key).unwrap();

    let events = feed.drain();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_type(), "inventory.item.added");
    assert_eq!(events[0].summary(), format!("Added new item {key}."));
    assert_eq!(events[1].summary(), format!("Removed item {key} (Level)."));
    assert!(events[0].occurred_at() <= events[1].occurred_at());
}

#[test]
fn generated_keys_follow_configured_prefix() {
    let config = InventoryConfig {
        key_prefix: "HW-".to_string(),
        key_segment_len: 6,
        ..InventoryConfig::default()
    };
    let store = InventoryStore::with_config(config).unwrap();

    let key = store.create(validate("Pipe", "2", "7", "").unwrap()).unwrap();
    assert!(key.as_str().starts_with("HW-"));
    assert_eq!(key.as_str().len(), 9);
    assert!(store.contains(&key));
}
