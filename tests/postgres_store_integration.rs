use keydash_api::db::{ApiKeyStore, PgApiKeyStore, StoreError};
use keydash_api::models::NewApiKey;
use keydash_api::utils::{generate_api_key, hash_api_key, key_hint};
use sqlx::PgPool;

fn test_db_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

async fn setup_store() -> Option<PgApiKeyStore> {
    let url = test_db_url()?;
    let pool = PgPool::connect(&url).await.ok()?;
    let store = PgApiKeyStore::new(pool);
    store.migrate().await.ok()?;
    Some(store)
}

fn new_key(name: &str) -> (String, NewApiKey) {
    let key = generate_api_key();
    let new_key = NewApiKey {
        name: name.to_string(),
        key_hash: hash_api_key(&key),
        key_hint: key_hint(&key),
        usage_limit: 1000,
    };
    (key, new_key)
}

#[tokio::test]
async fn given_insert_should_assign_id_and_zero_usage() {
    let Some(store) = setup_store().await else {
        return;
    };
    let (key, new_key) = new_key("pg-insert");

    let record = store.insert(&new_key).await.unwrap();

    assert_eq!(record.name, "pg-insert");
    assert_eq!(record.usage, 0);
    assert_eq!(record.usage_limit, 1000);
    assert_eq!(record.created_at, record.updated_at);

    let found = store.find_by_hash(&hash_api_key(&key)).await.unwrap();
    assert_eq!(found.map(|r| r.id), Some(record.id));

    assert_eq!(store.delete(record.id).await.unwrap(), 1);
}

#[tokio::test]
async fn given_rename_should_touch_only_name_and_updated_at() {
    let Some(store) = setup_store().await else {
        return;
    };
    let (_, new_key) = new_key("pg-before");
    let before = store.insert(&new_key).await.unwrap();

    assert_eq!(store.rename(before.id, "pg-after").await.unwrap(), 1);
    let after = store
        .find_by_hash(&before.key_hash)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(after.name, "pg-after");
    assert_eq!(after.key_hash, before.key_hash);
    assert_eq!(after.usage_limit, before.usage_limit);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);

    store.delete(before.id).await.unwrap();
}

#[tokio::test]
async fn given_missing_id_should_affect_no_rows() {
    let Some(store) = setup_store().await else {
        return;
    };
    let id = uuid::Uuid::new_v4();

    assert_eq!(store.rename(id, "nobody").await.unwrap(), 0);
    assert_eq!(store.delete(id).await.unwrap(), 0);
}

#[tokio::test]
async fn given_duplicate_hash_should_report_conflict() {
    let Some(store) = setup_store().await else {
        return;
    };
    let (_, new_key) = new_key("pg-dup");
    let record = store.insert(&new_key).await.unwrap();

    let err = store.insert(&new_key).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));

    store.delete(record.id).await.unwrap();
}

#[tokio::test]
async fn given_keys_list_should_be_newest_first() {
    let Some(store) = setup_store().await else {
        return;
    };
    let (_, first) = new_key("pg-first");
    let (_, second) = new_key("pg-second");
    let first = store.insert(&first).await.unwrap();
    let second = store.insert(&second).await.unwrap();

    let listed = store.list().await.unwrap();
    let pos = |id| listed.iter().position(|r| r.id == id).unwrap();
    assert!(pos(second.id) <= pos(first.id));

    store.delete(first.id).await.unwrap();
    store.delete(second.id).await.unwrap();
    assert!(store.ping().await.is_ok());
}
