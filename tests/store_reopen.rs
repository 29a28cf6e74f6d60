//! Store integration tests against a file-backed database.
//!
//! Covers what the in-memory unit tests cannot: durability across
//! reopen, repeated initialization on an existing file, and the
//! `userId` migration against a database created before the column
//! existed.

use rusqlite::Connection;
use tempfile::TempDir;

use skibidigo_core::{seed_toilets, ToiletStore};

fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn temp_db() -> (TempDir, String) {
    let tmp_dir = TempDir::new().expect("failed to create temp dir");
    let path = tmp_dir
        .path()
        .join("skibidigo.db")
        .to_str()
        .expect("utf-8 path")
        .to_string();
    (tmp_dir, path)
}

#[test]
fn test_saved_toilets_survive_reopen() {
    init_test_logging();
    let (_tmp, path) = temp_db();
    let toilet = seed_toilets().into_iter().next().unwrap();

    {
        let store = ToiletStore::open(&path).expect("open store");
        assert!(store.save_toilet(&toilet));
        assert!(store.post_comment(toilet.id, "Minh N.", 5, "Spotless.", Some("user-1")));
    }

    // Reopen re-runs schema creation and migration on the same file.
    let store = ToiletStore::open(&path).expect("reopen store");
    assert!(store.is_saved(toilet.id));

    let saved = store.saved_toilets();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].features, toilet.features);
    assert_eq!(saved[0].operating_hours, toilet.operating_hours);
    assert!(saved[0].reviews.is_empty());

    let comments = store.comments_for(toilet.id);
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].user_id.as_deref(), Some("user-1"));

    // Aggregates see the persisted comment: (3.2 * 24 + 5) / 25 = 3.272 -> 3.3
    assert_eq!(store.combined_rating(toilet.id, 3.2, 24), 3.3);
    assert_eq!(store.total_review_count(toilet.id, &toilet.reviews), 3);
}

#[test]
fn test_user_id_migration_on_legacy_database() {
    init_test_logging();
    let (_tmp, path) = temp_db();

    // Lay down the pre-accounts schema: comments without userId.
    {
        let conn = Connection::open(&path).expect("open raw connection");
        conn.execute_batch(
            "CREATE TABLE comments (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 toiletId INTEGER NOT NULL,
                 userName TEXT NOT NULL,
                 rating INTEGER NOT NULL,
                 comment TEXT NOT NULL,
                 timestamp TEXT NOT NULL
             );
             INSERT INTO comments (toiletId, userName, rating, comment, timestamp)
             VALUES (1, 'Legacy User', 4, 'Posted before accounts existed.',
                     '2024-01-15T08:30:00Z');",
        )
        .expect("create legacy schema");
    }

    let store = ToiletStore::open(&path).expect("open migrates schema");

    // The legacy row survives and reads back as anonymous.
    let comments = store.comments_for(1);
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].user_name, "Legacy User");
    assert_eq!(comments[0].user_id, None);

    // userId-dependent operations work immediately after migration.
    assert!(store.post_comment(1, "Minh N.", 5, "Great now!", Some("user-1")));
    assert!(store.has_user_reviewed(1, "user-1"));
    assert!(!store.has_user_reviewed(1, "user-2"));
    assert_eq!(store.comment_count(1), 2);

    // Reopening must not attempt the migration again.
    drop(store);
    let store = ToiletStore::open(&path).expect("reopen after migration");
    assert_eq!(store.comment_count(1), 2);
}

#[test]
fn test_upsert_keeps_single_row_across_reopen() {
    init_test_logging();
    let (_tmp, path) = temp_db();
    let mut toilet = seed_toilets().into_iter().next().unwrap();

    {
        let store = ToiletStore::open(&path).expect("open store");
        assert!(store.save_toilet(&toilet));
    }

    toilet.name = "Han Market (renovated)".to_string();
    let store = ToiletStore::open(&path).expect("reopen store");
    assert!(store.save_toilet(&toilet));

    let saved = store.saved_toilets();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].name, "Han Market (renovated)");
}
