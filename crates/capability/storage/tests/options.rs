use relay_storage::{InMemoryOptionStore, OptionRecord, OptionStore};

#[tokio::test]
async fn put_then_get_overwrites() {
    let store = InMemoryOptionStore::new();
    store
        .put_option("GroupRatio", r#"{"default":1}"#)
        .await
        .expect("put");
    store
        .put_option("GroupRatio", r#"{"default":1,"vip":0.5}"#)
        .await
        .expect("overwrite");

    let value = store.get_option("GroupRatio").await.expect("get");
    assert_eq!(value.as_deref(), Some(r#"{"default":1,"vip":0.5}"#));
    assert!(store.get_option("missing").await.expect("get").is_none());
}

#[tokio::test]
async fn list_is_sorted_by_key() {
    let store = InMemoryOptionStore::with_options([
        ("UserUsableGroups", "{}"),
        ("AutoGroups", "[]"),
        ("DefaultUseAutoGroup", "false"),
    ]);
    let options = store.list_options().await.expect("list");
    assert_eq!(
        options,
        vec![
            OptionRecord::new("AutoGroups", "[]"),
            OptionRecord::new("DefaultUseAutoGroup", "false"),
            OptionRecord::new("UserUsableGroups", "{}"),
        ]
    );
}
