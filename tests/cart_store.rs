//! Integration tests for the cart store over device storage

use std::sync::Arc;

use rust_decimal::dec;
use testresult::TestResult;

use tote::prelude::*;

fn candidate(id: &str) -> NewLineItem {
    NewLineItem::new(id, format!("Product {id}"), format!("https://img/{id}.png"), dec!(19.9))
}

async fn quantities(store: &CartStore) -> Result<Vec<(String, u32)>, CartStoreError> {
    store
        .with_cart(|cart| {
            cart.iter()
                .map(|item| (item.id.to_string(), item.quantity))
                .collect()
        })
        .await
}

fn expected(pairs: &[(&str, u32)]) -> Vec<(String, u32)> {
    pairs
        .iter()
        .map(|(id, quantity)| ((*id).to_string(), *quantity))
        .collect()
}

#[tokio::test]
async fn walkthrough_survives_reopen() -> TestResult {
    let dir = tempfile::tempdir()?;
    let storage = Arc::new(FileStorage::new(dir.path()));
    let a = ProductId::from("A");

    let store = CartStore::open(storage.clone(), CartStoreConfig::default()).await?;

    store.add_to_cart(candidate("A")).await?;
    assert_eq!(quantities(&store).await?, expected(&[("A", 1)]));

    store.add_to_cart(candidate("A")).await?;
    assert_eq!(quantities(&store).await?, expected(&[("A", 2)]));

    store.add_to_cart(candidate("B")).await?;
    assert_eq!(quantities(&store).await?, expected(&[("A", 2), ("B", 1)]));

    store.decrement(&a).await?;
    assert_eq!(quantities(&store).await?, expected(&[("A", 1), ("B", 1)]));

    store.decrement(&a).await?;
    assert_eq!(quantities(&store).await?, expected(&[("A", 0), ("B", 1)]));

    store.decrement(&a).await?;
    assert_eq!(quantities(&store).await?, expected(&[("A", 0), ("B", 1)]));

    store.close().await;

    let reopened = CartStore::open(storage, CartStoreConfig::default()).await?;

    assert_eq!(quantities(&reopened).await?, expected(&[("A", 0), ("B", 1)]));

    Ok(())
}

#[tokio::test]
async fn rapid_mutations_converge_to_latest_state() -> TestResult {
    let dir = tempfile::tempdir()?;
    let storage = Arc::new(FileStorage::new(dir.path()));

    let store = CartStore::open(storage.clone(), CartStoreConfig::default()).await?;

    for n in 0..20 {
        store.add_to_cart(candidate(&format!("P{}", n % 4))).await?;
        store.decrement(&ProductId::from("P0")).await?;
    }

    store.flush().await;

    let stored = storage
        .read(DEFAULT_STORAGE_KEY)
        .await?
        .unwrap_or_default();

    let persisted = tote::snapshot::decode(&stored)?;

    assert_eq!(persisted.items(), store.products().await?.as_slice());

    Ok(())
}

#[tokio::test]
async fn stores_are_isolated_by_key() -> TestResult {
    let dir = tempfile::tempdir()?;
    let storage = Arc::new(FileStorage::new(dir.path()));

    let first =
        CartStore::open(storage.clone(), CartStoreConfig::with_storage_key("@shop:one")).await?;
    let second =
        CartStore::open(storage.clone(), CartStoreConfig::with_storage_key("@shop:two")).await?;

    first.add_to_cart(candidate("A")).await?;
    second.add_to_cart(candidate("B")).await?;

    first.close().await;
    second.close().await;

    let first =
        CartStore::open(storage.clone(), CartStoreConfig::with_storage_key("@shop:one")).await?;
    let second = CartStore::open(storage, CartStoreConfig::with_storage_key("@shop:two")).await?;

    assert_eq!(quantities(&first).await?, expected(&[("A", 1)]));
    assert_eq!(quantities(&second).await?, expected(&[("B", 1)]));

    Ok(())
}

#[tokio::test]
async fn malformed_file_fails_to_open() -> TestResult {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path());

    std::fs::write(storage.path_for(DEFAULT_STORAGE_KEY), "{\"broken\":")?;

    let result = CartStore::open(Arc::new(storage), CartStoreConfig::default()).await;

    assert!(
        matches!(result, Err(CartStoreError::Snapshot(_))),
        "expected Snapshot error, got {result:?}"
    );

    Ok(())
}

#[tokio::test]
async fn shared_store_serialises_concurrent_callers() -> TestResult {
    let store = Arc::new(
        CartStore::open(Arc::new(MemoryStorage::new()), CartStoreConfig::default()).await?,
    );

    store.add_to_cart(candidate("A")).await?;

    let mut handles = Vec::new();

    for _ in 0..10 {
        let store = Arc::clone(&store);

        handles.push(tokio::spawn(async move {
            store.increment(&ProductId::from("A")).await
        }));
    }

    for handle in handles {
        handle.await??;
    }

    assert_eq!(quantities(&store).await?, expected(&[("A", 11)]));
    assert_eq!(store.summary().await?.quantity, 11);

    Ok(())
}
