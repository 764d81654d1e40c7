use course_core::model::{ProgressMap, SubtopicId};
use course_core::seed::default_catalog;
use storage::records::{self, Decoded};
use storage::repository::KeyValueStore;
use storage::sqlite::SqliteRepository;
use storage::{PROGRESS_KEY, Storage};

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_set_overwrites_and_remove_deletes() {
    let repo = connect("memdb_kv_overwrite").await;

    assert_eq!(repo.get("courses").await.unwrap(), None);
    repo.set("courses", "[]").await.unwrap();
    repo.set("courses", "[{}]").await.unwrap();
    assert_eq!(repo.get("courses").await.unwrap().as_deref(), Some("[{}]"));

    repo.remove("courses").await.unwrap();
    repo.remove("courses").await.unwrap();
    assert_eq!(repo.get("courses").await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = connect("memdb_kv_migrate_twice").await;
    repo.set("progress", "{}").await.unwrap();
    repo.migrate().await.expect("second migrate");
    assert_eq!(repo.get("progress").await.unwrap().as_deref(), Some("{}"));
}

#[tokio::test]
async fn sqlite_round_trips_typed_records() {
    let repo = connect("memdb_kv_records").await;
    let catalog = default_catalog();
    records::save_courses(&repo, &catalog).await.unwrap();

    let mut progress = ProgressMap::new();
    progress.set(SubtopicId::new("rf-ownership-moves"), true);
    progress.set(SubtopicId::new("rf-ownership-borrowing"), false);
    records::save_progress(&repo, &progress).await.unwrap();

    assert_eq!(
        records::load_courses(&repo).await.unwrap(),
        Decoded::Value(catalog)
    );
    assert_eq!(
        records::load_progress(&repo).await.unwrap(),
        Decoded::Value(progress)
    );
}

#[tokio::test]
async fn sqlite_corrupt_progress_decodes_as_malformed() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_corrupt?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage
        .records
        .set(PROGRESS_KEY, "{not json")
        .await
        .unwrap();

    let decoded = records::load_progress(storage.records.as_ref()).await.unwrap();
    assert!(decoded.is_malformed());
}
