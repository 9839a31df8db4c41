//! Command-line walkthrough of the shopping list.
//!
//! Persists to a JSON file in a fresh temporary directory, then reopens the
//! store from that file to show the list survived. The directory is removed
//! when the demo exits.

use pantry_core::environment::ShortIdGenerator;
use shopping_list::{
    CompletionIcon, FileStorage, ListAction, ListEnvironment, ListStore, ListView,
    QuantityDirection, open_store,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn print_list(store: &ListStore) {
    let view = store.state(|s| ListView::from(&s.items)).await;
    for row in &view.rows {
        let mark = match row.icon {
            CompletionIcon::CheckCircle => "✓",
            CompletionIcon::Circle => " ",
        };
        let controls = if row.quantity_controls_enabled { "" } else { " (locked)" };
        println!("  [{mark}] {:<12} x{}{controls}", row.name, row.quantity);
    }
    println!("  Total: {}", view.total);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,shopping_list=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    println!("=== Shopping List ===\n");

    let dir = tempfile::tempdir()?;
    let storage = Arc::new(FileStorage::new(dir.path()));
    let env = ListEnvironment::new(Arc::new(ShortIdGenerator::default()), storage.clone());
    let store = open_store(env);

    println!("Adding items...");
    for name in ["Milk", "Eggs", "Bread"] {
        store
            .send(ListAction::AddItem {
                name: name.to_string(),
            })
            .await?;
    }
    print_list(&store).await;

    let ids: Vec<_> = store
        .state(|s| s.items.iter().map(|item| item.id.clone()).collect())
        .await;
    let (Some(milk), Some(bread)) = (ids.first().cloned(), ids.last().cloned()) else {
        return Ok(());
    };

    println!("\nTwo more milk, bread is in the basket...");
    for _ in 0..2 {
        store
            .send(ListAction::AdjustQuantity {
                id: milk.clone(),
                direction: QuantityDirection::Increment,
            })
            .await?;
    }
    store.send(ListAction::ToggleCompleted { id: bread }).await?;
    print_list(&store).await;

    println!("\nOne milk too many...");
    store
        .send(ListAction::AdjustQuantity {
            id: milk,
            direction: QuantityDirection::Decrement,
        })
        .await?;
    print_list(&store).await;

    if let Some(error) = store.state(|s| s.last_persist_error.clone()).await {
        println!("\nLast write failed: {error}");
    }

    println!("\nReopening from {}...", dir.path().display());
    let reopened = open_store(ListEnvironment::new(
        Arc::new(ShortIdGenerator::default()),
        storage,
    ));
    print_list(&reopened).await;

    println!("\n=== Demo Complete ===");
    Ok(())
}
