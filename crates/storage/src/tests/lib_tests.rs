use super::*;

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn starts_empty() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert!(storage.list_items().await.expect("list").is_empty());
    assert_eq!(storage.count_items().await.expect("count"), 0);
}

#[tokio::test]
async fn creates_and_lists_items_in_id_order() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let first = storage
        .create_item("Inception")
        .await
        .expect("insert")
        .expect("created");
    let second = storage
        .create_item("Heat")
        .await
        .expect("insert")
        .expect("created");
    assert!(second.id > first.id);

    let items = storage.list_items().await.expect("list");
    assert_eq!(items, vec![first, second]);
}

#[tokio::test]
async fn create_rejects_taken_name_without_writing() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .create_item("Inception")
        .await
        .expect("insert")
        .expect("created");

    let duplicate = storage.create_item("Inception").await.expect("insert");
    assert!(duplicate.is_none());
    assert_eq!(storage.count_items().await.expect("count"), 1);
}

#[tokio::test]
async fn name_lookup_is_exact_and_case_sensitive() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .create_item("Inception")
        .await
        .expect("insert")
        .expect("created");

    assert!(storage.item_name_exists("Inception").await.expect("exists"));
    assert!(!storage.item_name_exists("inception").await.expect("exists"));
    assert!(!storage.item_name_exists(" Inception").await.expect("exists"));

    let other_case = storage.create_item("INCEPTION").await.expect("insert");
    assert!(other_case.is_some());
}

#[tokio::test]
async fn remove_then_exists_is_false() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let item = storage
        .create_item("Alien")
        .await
        .expect("insert")
        .expect("created");
    assert!(storage.item_name_exists("Alien").await.expect("exists"));

    assert!(storage.remove_item(item.id).await.expect("remove"));
    assert!(!storage.item_name_exists("Alien").await.expect("exists"));
    assert!(storage.find_item(item.id).await.expect("find").is_none());
}

#[tokio::test]
async fn remove_of_unknown_id_is_a_noop() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .create_item("Alien")
        .await
        .expect("insert")
        .expect("created");

    assert!(!storage.remove_item(ItemId(999)).await.expect("remove"));
    assert_eq!(storage.count_items().await.expect("count"), 1);
}

#[tokio::test]
async fn update_renames_in_place() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let item = storage
        .create_item("Inception")
        .await
        .expect("insert")
        .expect("created");

    let outcome = storage
        .update_item_name(item.id, "Interstellar")
        .await
        .expect("update");
    assert_eq!(outcome, UpdateOutcome::Renamed);

    let stored = storage
        .find_item(item.id)
        .await
        .expect("find")
        .expect("still there");
    assert_eq!(stored.name, "Interstellar");
}

#[tokio::test]
async fn update_to_own_name_is_allowed() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let item = storage
        .create_item("Heat")
        .await
        .expect("insert")
        .expect("created");

    let outcome = storage
        .update_item_name(item.id, "Heat")
        .await
        .expect("update");
    assert_eq!(outcome, UpdateOutcome::Renamed);
}

#[tokio::test]
async fn update_to_taken_name_is_rejected_by_the_index() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let heat = storage
        .create_item("Heat")
        .await
        .expect("insert")
        .expect("created");
    storage
        .create_item("Ronin")
        .await
        .expect("insert")
        .expect("created");

    let outcome = storage
        .update_item_name(heat.id, "Ronin")
        .await
        .expect("update");
    assert_eq!(outcome, UpdateOutcome::NameTaken);

    let stored = storage
        .find_item(heat.id)
        .await
        .expect("find")
        .expect("still there");
    assert_eq!(stored.name, "Heat");
}

#[tokio::test]
async fn update_of_unknown_id_reports_missing() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let outcome = storage
        .update_item_name(ItemId(12), "Ghost")
        .await
        .expect("update");
    assert_eq!(outcome, UpdateOutcome::Missing);
    assert!(storage.list_items().await.expect("list").is_empty());
}

#[tokio::test]
async fn null_names_read_back_as_empty() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    sqlx::query("INSERT INTO items (name) VALUES (NULL)")
        .execute(storage.pool())
        .await
        .expect("raw insert");

    let items = storage.list_items().await.expect("list");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("items.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}

#[test]
fn memory_urls_have_no_path() {
    assert!(sqlite_path("sqlite::memory:").is_none());
    assert!(sqlite_path("postgres://localhost/db").is_none());
    assert_eq!(
        sqlite_path("sqlite://data/items.db?mode=rwc"),
        Some(PathBuf::from("data/items.db"))
    );
}
