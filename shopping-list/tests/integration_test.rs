//! Integration tests for the shopping list with the Store
//!
//! These tests run the full loop: action → reducer → persist effect →
//! feedback event, against in-memory and file storage.

use pantry_core::environment::KeyValueStorage;
use pantry_testing::{FailingStorage, InMemoryStorage, SequentialIdGenerator, init_test_tracing};
use shopping_list::{
    FileStorage, ItemId, ListAction, ListConfig, ListEnvironment, ListStore, QuantityDirection,
    ShoppingList, open_store,
};
use std::sync::Arc;

fn env_over(storage: Arc<dyn KeyValueStorage>) -> ListEnvironment {
    ListEnvironment::new(SequentialIdGenerator::shared("item"), storage)
}

async fn add(store: &ListStore, name: &str) {
    let result = store
        .send(ListAction::AddItem {
            name: name.to_string(),
        })
        .await;
    assert!(result.is_ok(), "add {name:?} failed: {result:?}");
}

async fn adjust(store: &ListStore, id: &ItemId, direction: QuantityDirection) {
    let result = store
        .send(ListAction::AdjustQuantity {
            id: id.clone(),
            direction,
        })
        .await;
    assert!(result.is_ok());
}

async fn items(store: &ListStore) -> ShoppingList {
    store.state(|s| s.items.clone()).await
}

#[tokio::test]
async fn every_change_is_persisted_once() {
    init_test_tracing();
    let storage = InMemoryStorage::new();
    let store = open_store(env_over(storage.shared()));
    let milk = ItemId::new("item-1");
    assert_eq!(storage.write_count(), 1, "opening writes the slot once");

    add(&store, "Milk").await;
    adjust(&store, &milk, QuantityDirection::Increment).await;
    assert!(store
        .send(ListAction::ToggleCompleted { id: milk.clone() })
        .await
        .is_ok());
    adjust(&store, &milk, QuantityDirection::Decrement).await;

    assert_eq!(storage.write_count(), 1 + 4);
    assert_eq!(
        storage.value("items").as_deref(),
        Some(r#"[{"id":"item-1","name":"Milk","completed":true,"quantity":1}]"#)
    );
    assert_eq!(store.state(|s| s.count()).await, 1);
}

#[tokio::test]
async fn no_ops_never_write() {
    let storage = InMemoryStorage::new();
    let store = open_store(env_over(storage.shared()));
    let milk = ItemId::new("item-1");

    let opened = storage.write_count();

    add(&store, "").await;
    assert_eq!(storage.write_count(), opened);

    add(&store, "Milk").await;
    adjust(&store, &milk, QuantityDirection::Decrement).await;
    assert_eq!(storage.write_count(), opened + 2);

    // Quantity is now zero
    adjust(&store, &milk, QuantityDirection::Decrement).await;
    adjust(&store, &ItemId::new("ghost"), QuantityDirection::Increment).await;
    assert!(store
        .send(ListAction::ToggleCompleted {
            id: ItemId::new("ghost"),
        })
        .await
        .is_ok());

    assert_eq!(storage.write_count(), opened + 2);
    assert_eq!(items(&store).await.items()[0].quantity, 0);
}

#[tokio::test]
async fn reopened_store_sees_persisted_list() {
    let storage = InMemoryStorage::new();
    let store = open_store(env_over(storage.shared()));
    add(&store, "Milk").await;
    add(&store, "Eggs").await;
    adjust(&store, &ItemId::new("item-2"), QuantityDirection::Increment).await;

    let reopened = open_store(env_over(storage.shared()));
    assert_eq!(items(&reopened).await, items(&store).await);
}

#[tokio::test]
async fn opening_normalizes_a_missing_slot() {
    let storage = InMemoryStorage::new();
    let store = open_store(env_over(storage.shared()));

    assert_eq!(storage.value("items").as_deref(), Some("[]"));
    assert!(store.state(|s| s.last_persist_error.is_none()).await);
}

#[tokio::test]
async fn malformed_storage_opens_empty_and_is_overwritten() {
    init_test_tracing();
    let storage = InMemoryStorage::with_entry("items", "definitely not json");
    let store = open_store(env_over(storage.shared()));

    assert!(items(&store).await.is_empty());
    assert_eq!(storage.value("items").as_deref(), Some("[]"));

    add(&store, "Milk").await;
    assert_eq!(
        storage.value("items").as_deref(),
        Some(r#"[{"id":"item-1","name":"Milk","completed":false,"quantity":1}]"#)
    );
}

#[tokio::test]
async fn unreadable_storage_opens_empty() {
    let store = open_store(env_over(FailingStorage::reads().shared()));
    assert!(items(&store).await.is_empty());
    add(&store, "Milk").await;
    assert_eq!(store.state(|s| s.count()).await, 1);
}

#[tokio::test]
async fn failed_write_is_recorded_and_cleared() {
    init_test_tracing();
    let store = open_store(env_over(FailingStorage::writes().shared()));
    assert!(store.state(|s| s.last_persist_error.is_some()).await);

    add(&store, "Milk").await;

    let (count, error) = store
        .state(|s| (s.count(), s.last_persist_error.clone()))
        .await;
    assert_eq!(count, 1, "in-memory change is kept");
    assert!(error.is_some_and(|reason| reason.contains("refused")));

    // A later successful write clears the error
    assert!(store.send(ListAction::Persisted).await.is_ok());
    assert!(store.state(|s| s.last_persist_error.is_none()).await);
}

#[tokio::test]
async fn concurrent_adds_get_distinct_ids() {
    let storage = InMemoryStorage::new();
    let store = open_store(env_over(storage.shared()));

    let handles: Vec<_> = (0..10)
        .map(|n| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .send(ListAction::AddItem {
                        name: format!("item {n}"),
                    })
                    .await
            })
        })
        .collect();
    for handle in handles {
        assert!(matches!(handle.await, Ok(Ok(()))));
    }

    let list = items(&store).await;
    assert_eq!(list.len(), 10);
    let mut ids: Vec<&str> = list.iter().map(|item| item.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10);

    // The last write holds the full list
    let persisted: ShoppingList =
        serde_json::from_str(&storage.value("items").unwrap_or_default()).unwrap();
    assert_eq!(persisted, list);
}

#[tokio::test]
async fn custom_key_and_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(dir.path()));
    let config = ListConfig::default().with_storage_key("groceries");

    let store = open_store(ListEnvironment::with_config(
        SequentialIdGenerator::shared("item"),
        Arc::clone(&storage),
        config.clone(),
    ));
    add(&store, "Coffee").await;
    assert!(dir.path().join("groceries.json").is_file());

    let reopened = open_store(ListEnvironment::with_config(
        SequentialIdGenerator::shared("other"),
        storage,
        config,
    ));
    let list = items(&reopened).await;
    assert_eq!(list.len(), 1);
    assert_eq!(list.items()[0].name, "Coffee");
}
