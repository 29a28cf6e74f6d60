//! SQLite-backed store for saved facilities and user comments.
//!
//! The store owns a single connection for the process lifetime and is
//! constructed once by the composition root, then passed by reference
//! to whoever needs it. Two tables:
//!
//! - `saved_toilets`: denormalized copies of bookmarked facilities,
//!   one row per facility id, feature set and operating hours encoded
//!   as JSON text.
//! - `comments`: user reviews keyed by an autoincrement id, with an
//!   optional `userId` added by migration for accounts.
//!
//! ## Failure contract
//!
//! Only construction returns an error. Every operation after that
//! catches the underlying SQLite fault, logs it, and reports failure
//! through its return value (`false`, `0`, or an empty `Vec`). Callers
//! must check return values; nothing here is retried.

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::{Result, StoreError};
use crate::types::{GenderType, GeoPoint, Review, Toilet, ToiletType};

/// Embedded store for saved facilities and comments.
pub struct ToiletStore {
    conn: Connection,
}

impl ToiletStore {
    // ========================================================================
    // Initialization
    // ========================================================================

    /// Open (or create) the database at `path` and bring the schema up
    /// to date. Safe to call on an existing database: table creation is
    /// `IF NOT EXISTS` and the migration checks before altering.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).map_err(StoreError::Open)?;
        let store = Self { conn };
        store.init_schema()?;
        log::info!("[ToiletStore] opened database at {}", path);
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StoreError::Open)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create tables if absent, then run migrations. Idempotent.
    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS saved_toilets (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    address TEXT,
                    latitude REAL NOT NULL,
                    longitude REAL NOT NULL,
                    type TEXT NOT NULL,
                    gender TEXT NOT NULL,
                    features TEXT,
                    hasFee INTEGER,
                    waterLaser INTEGER,
                    rating REAL,
                    reviewCount INTEGER,
                    distance REAL,
                    operatingHours TEXT,
                    savedAt TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS comments (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    toiletId INTEGER NOT NULL,
                    userName TEXT NOT NULL,
                    rating INTEGER NOT NULL,
                    comment TEXT NOT NULL,
                    timestamp TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_comments_toilet ON comments(toiletId);
                "#,
            )
            .map_err(StoreError::Schema)?;

        self.migrate_comments_user_id()?;

        Ok(())
    }

    /// Migration: add the `userId` column to `comments` if missing.
    /// Must run before any comment insert/query that references it.
    fn migrate_comments_user_id(&self) -> Result<()> {
        if self
            .column_exists("comments", "userId")
            .map_err(StoreError::Migration)?
        {
            return Ok(());
        }

        log::info!("[ToiletStore] migrating comments table: adding userId column");
        self.conn
            .execute("ALTER TABLE comments ADD COLUMN userId TEXT", [])
            .map_err(StoreError::Migration)?;

        Ok(())
    }

    /// Schema introspection via pragma_table_info.
    fn column_exists(&self, table: &str, column: &str) -> rusqlite::Result<bool> {
        let count: i64 = self
            .conn
            .prepare("SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2")?
            .query_row(params![table, column], |row| row.get(0))?;
        Ok(count > 0)
    }

    // ========================================================================
    // Saved facilities
    // ========================================================================

    /// Upsert a facility into the saved list (insert-or-replace by id).
    /// The saved copy is a snapshot: `savedAt` is set to now and any
    /// prior copy of the same id is overwritten.
    pub fn save_toilet(&self, toilet: &Toilet) -> bool {
        let features = match serde_json::to_string(&toilet.features) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("[ToiletStore] failed to encode features: {}", e);
                return false;
            }
        };
        let operating_hours = match serde_json::to_string(&toilet.operating_hours) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("[ToiletStore] failed to encode operating hours: {}", e);
                return false;
            }
        };

        let result = self.conn.execute(
            "INSERT OR REPLACE INTO saved_toilets
             (id, name, address, latitude, longitude, type, gender, features,
              hasFee, waterLaser, rating, reviewCount, distance, operatingHours, savedAt)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                toilet.id,
                toilet.name,
                toilet.address,
                toilet.coordinates.latitude,
                toilet.coordinates.longitude,
                toilet.toilet_type.as_str(),
                toilet.gender.as_str(),
                features,
                toilet.has_fee as i64,
                toilet.water_laser as i64,
                toilet.rating,
                toilet.review_count,
                toilet.distance,
                operating_hours,
                Utc::now().to_rfc3339(),
            ],
        );

        match result {
            Ok(changes) => changes > 0,
            Err(e) => {
                log::warn!("[ToiletStore] failed to save toilet {}: {}", toilet.id, e);
                false
            }
        }
    }

    /// Delete a saved facility. Returns whether a row was removed.
    pub fn remove_saved(&self, toilet_id: i64) -> bool {
        match self
            .conn
            .execute("DELETE FROM saved_toilets WHERE id = ?1", params![toilet_id])
        {
            Ok(changes) => changes > 0,
            Err(e) => {
                log::warn!("[ToiletStore] failed to remove toilet {}: {}", toilet_id, e);
                false
            }
        }
    }

    /// Existence check, no side effect.
    pub fn is_saved(&self, toilet_id: i64) -> bool {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM saved_toilets WHERE id = ?1",
                params![toilet_id],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .unwrap_or_else(|e| {
                log::warn!("[ToiletStore] is_saved query failed: {}", e);
                false
            })
    }

    /// All saved facilities, most recently saved first. Feature sets
    /// and operating hours are decoded from their JSON columns; the
    /// embedded review list is always empty (comments are fetched
    /// separately).
    pub fn saved_toilets(&self) -> Vec<Toilet> {
        let mut stmt = match self.conn.prepare(
            "SELECT id, name, address, latitude, longitude, type, gender, features,
                    hasFee, waterLaser, rating, reviewCount, distance, operatingHours
             FROM saved_toilets ORDER BY savedAt DESC",
        ) {
            Ok(stmt) => stmt,
            Err(e) => {
                log::warn!("[ToiletStore] failed to prepare saved_toilets query: {}", e);
                return Vec::new();
            }
        };

        let rows = stmt.query_map([], |row| {
            let type_text: String = row.get(5)?;
            let gender_text: String = row.get(6)?;
            let features_json: Option<String> = row.get(7)?;
            let hours_json: Option<String> = row.get(13)?;

            Ok(Toilet {
                id: row.get(0)?,
                name: row.get(1)?,
                address: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                coordinates: GeoPoint {
                    latitude: row.get(3)?,
                    longitude: row.get(4)?,
                },
                toilet_type: ToiletType::from_str(&type_text).unwrap_or(ToiletType::Public),
                gender: GenderType::from_str(&gender_text).unwrap_or(GenderType::Unisex),
                features: features_json
                    .and_then(|json| serde_json::from_str(&json).ok())
                    .unwrap_or_default(),
                has_fee: row.get::<_, Option<i64>>(8)?.unwrap_or(0) != 0,
                water_laser: row.get::<_, Option<i64>>(9)?.unwrap_or(0) != 0,
                rating: row.get::<_, Option<f64>>(10)?.unwrap_or(0.0),
                review_count: row.get::<_, Option<u32>>(11)?.unwrap_or(0),
                distance: row.get::<_, Option<f64>>(12)?.unwrap_or(0.0),
                operating_hours: hours_json
                    .and_then(|json| serde_json::from_str(&json).ok())
                    .unwrap_or_default(),
                reviews: Vec::new(),
            })
        });

        match rows {
            Ok(iter) => iter.filter_map(|r| r.ok()).collect(),
            Err(e) => {
                log::warn!("[ToiletStore] failed to fetch saved toilets: {}", e);
                Vec::new()
            }
        }
    }

    /// Total number of saved facilities.
    pub fn saved_count(&self) -> u32 {
        self.conn
            .query_row("SELECT COUNT(*) FROM saved_toilets", [], |row| row.get(0))
            .unwrap_or_else(|e| {
                log::warn!("[ToiletStore] saved_count query failed: {}", e);
                0
            })
    }

    /// Wipe all saved facilities. Returns whether any row was removed.
    pub fn clear_saved(&self) -> bool {
        match self.conn.execute("DELETE FROM saved_toilets", []) {
            Ok(changes) => changes > 0,
            Err(e) => {
                log::warn!("[ToiletStore] failed to clear saved toilets: {}", e);
                false
            }
        }
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Insert a comment with the current timestamp. `user_id` is None
    /// for anonymous comments. `toilet_id` is not checked against any
    /// facility list; orphaned comments are tolerated.
    pub fn post_comment(
        &self,
        toilet_id: i64,
        user_name: &str,
        rating: u8,
        comment: &str,
        user_id: Option<&str>,
    ) -> bool {
        let result = self.conn.execute(
            "INSERT INTO comments (toiletId, userName, rating, comment, timestamp, userId)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                toilet_id,
                user_name,
                rating,
                comment,
                Utc::now().to_rfc3339(),
                user_id,
            ],
        );

        match result {
            Ok(changes) => changes > 0,
            Err(e) => {
                log::warn!(
                    "[ToiletStore] failed to post comment for toilet {}: {}",
                    toilet_id,
                    e
                );
                false
            }
        }
    }

    /// Update rating, text, and timestamp of an existing comment.
    /// Returns false when the id does not exist.
    pub fn update_comment(&self, comment_id: i64, rating: u8, comment: &str) -> bool {
        let result = self.conn.execute(
            "UPDATE comments SET rating = ?1, comment = ?2, timestamp = ?3 WHERE id = ?4",
            params![rating, comment, Utc::now().to_rfc3339(), comment_id],
        );

        match result {
            Ok(changes) => changes > 0,
            Err(e) => {
                log::warn!(
                    "[ToiletStore] failed to update comment {}: {}",
                    comment_id,
                    e
                );
                false
            }
        }
    }

    /// Delete a comment by id. Returns whether a row was removed.
    pub fn delete_comment(&self, comment_id: i64) -> bool {
        match self
            .conn
            .execute("DELETE FROM comments WHERE id = ?1", params![comment_id])
        {
            Ok(changes) => changes > 0,
            Err(e) => {
                log::warn!(
                    "[ToiletStore] failed to delete comment {}: {}",
                    comment_id,
                    e
                );
                false
            }
        }
    }

    /// All comments for a facility, newest first.
    pub fn comments_for(&self, toilet_id: i64) -> Vec<Review> {
        self.query_reviews(
            "SELECT id, userName, rating, comment, timestamp, userId
             FROM comments WHERE toiletId = ?1 ORDER BY timestamp DESC",
            params![toilet_id],
        )
    }

    /// Comments left by one user on one facility, newest first.
    pub fn user_reviews(&self, toilet_id: i64, user_id: &str) -> Vec<Review> {
        self.query_reviews(
            "SELECT id, userName, rating, comment, timestamp, userId
             FROM comments WHERE toiletId = ?1 AND userId = ?2 ORDER BY timestamp DESC",
            params![toilet_id, user_id],
        )
    }

    /// Number of stored comments for a facility.
    pub fn comment_count(&self, toilet_id: i64) -> u32 {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM comments WHERE toiletId = ?1",
                params![toilet_id],
                |row| row.get(0),
            )
            .unwrap_or_else(|e| {
                log::warn!("[ToiletStore] comment_count query failed: {}", e);
                0
            })
    }

    /// Whether the user already reviewed the facility. The UI checks
    /// this before allowing a submit; the table itself carries no
    /// uniqueness constraint (legacy anonymous rows are exempt).
    pub fn has_user_reviewed(&self, toilet_id: i64, user_id: &str) -> bool {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM comments WHERE toiletId = ?1 AND userId = ?2",
                params![toilet_id, user_id],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .unwrap_or_else(|e| {
                log::warn!("[ToiletStore] has_user_reviewed query failed: {}", e);
                false
            })
    }

    fn query_reviews(&self, sql: &str, query_params: &[&dyn rusqlite::ToSql]) -> Vec<Review> {
        let mut stmt = match self.conn.prepare(sql) {
            Ok(stmt) => stmt,
            Err(e) => {
                log::warn!("[ToiletStore] failed to prepare comments query: {}", e);
                return Vec::new();
            }
        };

        let rows = stmt.query_map(query_params, |row| {
            Ok(Review {
                id: row.get(0)?,
                user_name: row.get(1)?,
                rating: row.get(2)?,
                comment: row.get(3)?,
                timestamp: row.get(4)?,
                user_id: row.get(5)?,
            })
        });

        match rows {
            Ok(iter) => iter.filter_map(|r| r.ok()).collect(),
            Err(e) => {
                log::warn!("[ToiletStore] failed to fetch comments: {}", e);
                Vec::new()
            }
        }
    }

    /// Raw connection access for aggregate queries in the stats module.
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_toilets;
    use crate::types::Feature;

    fn sample_toilet() -> Toilet {
        seed_toilets().into_iter().next().unwrap()
    }

    #[test]
    fn test_init_is_idempotent() {
        let store = ToiletStore::in_memory().unwrap();
        // Re-running schema creation on a live store must not error
        // or touch existing data.
        assert!(store.save_toilet(&sample_toilet()));
        store.init_schema().unwrap();
        assert_eq!(store.saved_count(), 1);
    }

    #[test]
    fn test_save_then_is_saved() {
        let store = ToiletStore::in_memory().unwrap();
        let toilet = sample_toilet();

        assert!(!store.is_saved(toilet.id));
        assert!(store.save_toilet(&toilet));
        assert!(store.is_saved(toilet.id));

        assert!(store.remove_saved(toilet.id));
        assert!(!store.is_saved(toilet.id));
        assert!(!store.remove_saved(toilet.id));
    }

    #[test]
    fn test_save_twice_overwrites() {
        let store = ToiletStore::in_memory().unwrap();
        let mut toilet = sample_toilet();

        assert!(store.save_toilet(&toilet));
        toilet.name = "Renamed Facility".to_string();
        assert!(store.save_toilet(&toilet));

        let saved = store.saved_toilets();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "Renamed Facility");
    }

    #[test]
    fn test_round_trip_preserves_blobs() {
        let store = ToiletStore::in_memory().unwrap();
        let toilet = sample_toilet();
        assert!(store.save_toilet(&toilet));

        let saved = store.saved_toilets();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].features, toilet.features);
        assert_eq!(saved[0].operating_hours, toilet.operating_hours);
        assert!(saved[0].has_feature(Feature::Accessible));
        // Saved copies never embed reviews.
        assert!(saved[0].reviews.is_empty());
    }

    #[test]
    fn test_list_order_most_recent_first() {
        let store = ToiletStore::in_memory().unwrap();
        let mut toilets = seed_toilets().into_iter();
        let first = toilets.next().unwrap();
        let second = toilets.next().unwrap();

        // Force distinct savedAt values: rfc3339 carries sub-second
        // precision, but not reliably across platforms.
        assert!(store.save_toilet(&first));
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(store.save_toilet(&second));

        let saved = store.saved_toilets();
        assert_eq!(saved[0].id, second.id);
        assert_eq!(saved[1].id, first.id);
    }

    #[test]
    fn test_saved_count_and_clear() {
        let store = ToiletStore::in_memory().unwrap();
        for toilet in seed_toilets().iter().take(3) {
            assert!(store.save_toilet(toilet));
        }
        assert_eq!(store.saved_count(), 3);

        assert!(store.clear_saved());
        assert_eq!(store.saved_count(), 0);
        assert!(!store.clear_saved());
    }

    #[test]
    fn test_comment_lifecycle() {
        let store = ToiletStore::in_memory().unwrap();

        assert!(store.post_comment(1, "Minh N.", 4, "Clean and modern.", Some("user-1")));
        let comments = store.comments_for(1);
        assert_eq!(comments.len(), 1);
        let id = comments[0].id;
        assert_eq!(comments[0].rating, 4);
        assert_eq!(comments[0].user_id.as_deref(), Some("user-1"));
        assert!(comments[0].timestamp.is_some());

        assert!(store.update_comment(id, 2, "Went downhill."));
        let comments = store.comments_for(1);
        assert_eq!(comments[0].rating, 2);
        assert_eq!(comments[0].comment, "Went downhill.");

        assert!(store.delete_comment(id));
        assert!(store.comments_for(1).is_empty());
    }

    #[test]
    fn test_update_missing_comment_is_noop() {
        let store = ToiletStore::in_memory().unwrap();
        assert!(store.post_comment(1, "Minh N.", 4, "ok", None));

        assert!(!store.update_comment(9999, 5, "nope"));
        assert_eq!(store.comment_count(1), 1);
    }

    #[test]
    fn test_has_user_reviewed_and_user_reviews() {
        let store = ToiletStore::in_memory().unwrap();
        assert!(store.post_comment(1, "Minh N.", 4, "ok", Some("user-1")));
        assert!(store.post_comment(1, "Anon", 3, "meh", None));
        assert!(store.post_comment(2, "Minh N.", 5, "great", Some("user-1")));

        assert!(store.has_user_reviewed(1, "user-1"));
        assert!(!store.has_user_reviewed(1, "user-2"));

        let mine = store.user_reviews(1, "user-1");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].user_name, "Minh N.");
    }

    #[test]
    fn test_comments_ordered_newest_first() {
        let store = ToiletStore::in_memory().unwrap();
        assert!(store.post_comment(1, "A", 3, "first", None));
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(store.post_comment(1, "B", 4, "second", None));

        let comments = store.comments_for(1);
        assert_eq!(comments[0].comment, "second");
        assert_eq!(comments[1].comment, "first");
    }
}
