//! Contract tests shared by every store driver.

use noterfy::note::{Error, Note};
use noterfy::store::{FileStore, MemoryStore, Pagination, SortBy, Store};
use noterfy::timefmt;
use uuid::Uuid;

fn sample_note(title: &str) -> Note {
    Note::default()
        .with_id(Uuid::new_v4())
        .with_title(title)
        .with_content(format!("{title} content"))
        .with_favorite(false)
}

async fn store_contract(store: &dyn Store) {
    // Insert and read back.
    let mut note = sample_note("alpha");
    note.created_time = Some(timefmt::now());
    store.insert(&note).await.unwrap();
    assert_eq!(store.get(note.id).await.unwrap(), note);

    // A second insert with the same id conflicts.
    assert!(matches!(store.insert(&note).await, Err(Error::Exists)));

    // A nil id is rejected.
    let nil = Note::default().with_title("no id");
    assert!(matches!(store.insert(&nil).await, Err(Error::NilId)));

    // Update merges only the provided fields.
    let patch = Note::default().with_id(note.id).with_title("alpha 2");
    let updated = store.update(&patch).await.unwrap();
    assert_eq!(updated.title.as_deref(), Some("alpha 2"));
    assert_eq!(updated.content, note.content);
    assert_eq!(updated.created_time, note.created_time);

    // Updating an unknown note fails.
    let unknown = sample_note("ghost");
    assert!(matches!(store.update(&unknown).await, Err(Error::NotFound)));

    // Delete is idempotent.
    store.delete(note.id).await.unwrap();
    store.delete(note.id).await.unwrap();
    assert!(matches!(store.get(note.id).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn memory_store_follows_the_contract() {
    let store = MemoryStore::new();
    store_contract(&store).await;
}

#[tokio::test]
async fn file_store_follows_the_contract() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path());
    store_contract(&store).await;
}

#[tokio::test]
async fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let mut note = sample_note("persisted");
    note.created_time = Some(timefmt::now());

    {
        let store = FileStore::open(dir.path());
        store.insert(&note).await.unwrap();
    }

    let reopened = FileStore::open(dir.path());
    assert_eq!(reopened.get(note.id).await.unwrap(), note);
}

#[tokio::test]
async fn file_store_starts_empty_on_a_fresh_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path());
    let result = store.fetch(&Pagination::default()).await.unwrap();
    assert_eq!(result.total_count, 0);
    assert!(result.notes.is_empty());
}

#[tokio::test]
async fn fetch_sorts_and_paginates() {
    let store = MemoryStore::new();
    for title in ["bravo", "alpha", "delta", "charlie", "echo"] {
        store.insert(&sample_note(title)).await.unwrap();
    }

    let titles = |result: &noterfy::store::FetchResult| -> Vec<String> {
        result
            .notes
            .iter()
            .filter_map(|n| n.title.clone())
            .collect()
    };

    // First page, sorted by title ascending.
    let page1 = store
        .fetch(&Pagination {
            page: 1,
            size: 2,
            sort_by: SortBy::Title,
            ascending: true,
        })
        .await
        .unwrap();
    assert_eq!(titles(&page1), ["alpha", "bravo"]);
    assert_eq!(page1.total_count, 5);
    assert_eq!(page1.total_pages, 3);

    // Last page holds the remainder.
    let page3 = store
        .fetch(&Pagination {
            page: 3,
            size: 2,
            sort_by: SortBy::Title,
            ascending: true,
        })
        .await
        .unwrap();
    assert_eq!(titles(&page3), ["echo"]);

    // Descending flips the order.
    let descending = store
        .fetch(&Pagination {
            page: 1,
            size: 2,
            sort_by: SortBy::Title,
            ascending: false,
        })
        .await
        .unwrap();
    assert_eq!(titles(&descending), ["echo", "delta"]);
}

#[tokio::test]
async fn fetch_sorts_by_created_date() {
    let store = MemoryStore::new();

    let mut older = sample_note("older");
    older.created_time = "2023-01-01T00:00:00Z".parse().ok();
    let mut newer = sample_note("newer");
    newer.created_time = "2024-01-01T00:00:00Z".parse().ok();

    store.insert(&newer).await.unwrap();
    store.insert(&older).await.unwrap();

    let result = store
        .fetch(&Pagination {
            sort_by: SortBy::CreatedDate,
            ..Pagination::default()
        })
        .await
        .unwrap();
    let titles: Vec<_> = result.notes.iter().filter_map(|n| n.title.as_deref()).collect();
    assert_eq!(titles, ["older", "newer"]);
}
