use relay_storage::{InMemoryRequestRateStore, RATE_RETENTION_MS, RequestRateStore};

#[tokio::test]
async fn counts_per_user_and_total() {
    let store = InMemoryRequestRateStore::new();
    let now = 10_000_000;
    for at in [now - 120_000, now - 30_000, now - 1_000] {
        store.record_request(1, at).await.expect("record");
    }
    store.record_request(2, now - 500).await.expect("record");

    assert_eq!(store.count_since(1, now - 60_000).await.expect("count"), 2);
    assert_eq!(store.count_since(1, now - 180_000).await.expect("count"), 3);
    assert_eq!(store.count_since(3, now - 60_000).await.expect("count"), 0);
    assert_eq!(store.count_all_since(now - 60_000).await.expect("total"), 3);
}

#[tokio::test]
async fn old_entries_are_pruned() {
    let store = InMemoryRequestRateStore::new();
    let now = 100_000_000;
    store
        .record_request(1, now - RATE_RETENTION_MS - 1)
        .await
        .expect("record");
    store.record_request(1, now).await.expect("record");
    assert_eq!(store.count_since(1, 0).await.expect("count"), 1);
}

#[tokio::test]
async fn idle_users_are_evicted_on_write() {
    let store = InMemoryRequestRateStore::new();
    let start = 50_000_000;
    store.record_request(1, start).await.expect("record");
    store.record_request(2, start + 1_000).await.expect("record");
    assert_eq!(store.tracked_users().expect("users"), 2);

    store
        .record_request(3, start + RATE_RETENTION_MS + 500)
        .await
        .expect("record");
    assert_eq!(store.tracked_users().expect("users"), 2);
    assert_eq!(store.count_since(1, 0).await.expect("count"), 0);
    assert_eq!(store.count_all_since(0).await.expect("total"), 2);
}
