use cfgsync_store::*;

fn env(name: &str) -> Environment {
    Environment::try_from(name).unwrap()
}

fn name(name: &str) -> ConfigName {
    ConfigName::try_from(name).unwrap()
}

#[tokio::test]
async fn test_namespace_isolation() {
    let client = MemoryClient::new();
    let prod = NamespacedStore::new(client.clone(), env("prod"));
    let dev = NamespacedStore::new(client.clone(), env("dev"));

    prod.set(&name("db.yaml"), b"prod").await.unwrap();
    dev.set(&name("db.yaml"), b"dev").await.unwrap();

    assert_eq!(prod.get(&name("db.yaml")).await.unwrap(), b"prod");
    assert_eq!(dev.get(&name("db.yaml")).await.unwrap(), b"dev");

    let keys: Vec<_> = client.snapshot().into_keys().collect();
    assert_eq!(keys, ["dev/db.yaml", "prod/db.yaml"]);
}

#[tokio::test]
async fn test_list_strips_prefix_and_ignores_lookalike_environments() {
    let client = MemoryClient::with_entries([
        ("prod/a.yaml", "1"),
        ("prod/b.yaml", "2"),
        ("prod2/c.yaml", "3"),
        ("prodx", "4"),
    ]);
    let prod = NamespacedStore::new(client, env("prod"));

    let set = prod.list_all().await.unwrap();
    assert_eq!(set.names().collect::<Vec<_>>(), ["a.yaml", "b.yaml"]);
    assert_eq!(set.get("b.yaml"), Some(&b"2"[..]));
    assert!(set.get("c.yaml").is_none());
}

#[tokio::test]
async fn test_list_keeps_names_that_are_not_valid_file_names() {
    let client = MemoryClient::with_entries([("prod/nested/x", "1")]);
    let prod = NamespacedStore::new(client, env("prod"));

    let set = prod.list_all().await.unwrap();
    assert_eq!(set.names().collect::<Vec<_>>(), ["nested/x"]);
    assert!(ConfigName::try_from("nested/x").is_err());
}

#[tokio::test]
async fn test_missing_key_is_not_found() {
    let prod = NamespacedStore::new(MemoryClient::new(), env("prod"));

    let err = prod.get(&name("absent")).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert!(err.to_string().contains("prod/absent"));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let client = MemoryClient::with_entries([("prod/a", "1")]);
    let prod = NamespacedStore::new(client.clone(), env("prod"));

    prod.delete(&name("a")).await.unwrap();
    prod.delete(&name("a")).await.unwrap();
    assert!(client.is_empty());
}

#[tokio::test]
async fn test_empty_environment_lists_nothing() {
    let prod = NamespacedStore::new(MemoryClient::new(), env("prod"));
    assert!(prod.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_offline_store_surfaces_unavailable() {
    let client = MemoryClient::new();
    let prod = NamespacedStore::new(client.clone(), env("prod"));
    client.set_offline(true);

    let err = prod.list_all().await.unwrap_err();
    assert!(err.is_unavailable());
    let err = prod.set(&name("a"), b"x").await.unwrap_err();
    assert!(matches!(err, StoreError::Unavailable { .. }));
}
