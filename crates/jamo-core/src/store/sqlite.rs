//! SQLite-backed progress store.
//!
//! Per-character progress lives in a real table; the two singletons are
//! JSON blobs in a `kv` table. The connection sits behind an async mutex,
//! so all reads and writes are serialized: the get-or-create path for
//! singletons cannot race, and `save_review` runs its two upserts inside
//! one transaction.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::{Result, StorageError};
use crate::progress::{CharacterProgress, Settings};
use crate::stats::SessionStats;

use super::{data_dir, ProgressStore};

const SETTINGS_KEY: &str = "settings";
const STATS_KEY: &str = "stats";

/// SQLite store for progress, settings, and stats.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the store at `~/.config/jamo/jamo.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be
    /// created or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("jamo.db");
        Self::open_at(&path)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS character_progress (
            character_id     TEXT PRIMARY KEY,
            rating           INTEGER NOT NULL,
            last_reviewed    TEXT NOT NULL,
            next_review_date TEXT NOT NULL,
            review_count     INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_progress_next_review
            ON character_progress(next_review_date);",
    )
    .map_err(|e| StorageError::MigrationFailed(e.to_string()))
}

#[async_trait::async_trait]
impl ProgressStore for SqliteStore {
    async fn load_progress(
        &self,
        character_id: &str,
    ) -> Result<Option<CharacterProgress>, StorageError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT character_id, rating, last_reviewed, next_review_date, review_count
             FROM character_progress WHERE character_id = ?1",
        )?;
        let result = stmt.query_row(params![character_id], row_to_raw);
        match result {
            Ok(raw) => Ok(Some(raw.decode()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn load_all_progress(&self) -> Result<Vec<CharacterProgress>, StorageError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT character_id, rating, last_reviewed, next_review_date, review_count
             FROM character_progress",
        )?;
        let rows = stmt.query_map([], row_to_raw)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.decode()?);
        }
        Ok(records)
    }

    async fn save_progress(&self, progress: &CharacterProgress) -> Result<(), StorageError> {
        let conn = self.conn.lock().await;
        upsert_progress(&conn, progress)?;
        Ok(())
    }

    async fn settings(&self) -> Result<Settings, StorageError> {
        let mut conn = self.conn.lock().await;
        load_singleton(&mut conn, SETTINGS_KEY)
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        let conn = self.conn.lock().await;
        kv_put(&conn, SETTINGS_KEY, &encode(SETTINGS_KEY, settings)?)?;
        Ok(())
    }

    async fn stats(&self) -> Result<SessionStats, StorageError> {
        let mut conn = self.conn.lock().await;
        load_singleton(&mut conn, STATS_KEY)
    }

    async fn save_stats(&self, stats: &SessionStats) -> Result<(), StorageError> {
        let conn = self.conn.lock().await;
        kv_put(&conn, STATS_KEY, &encode(STATS_KEY, stats)?)?;
        Ok(())
    }

    async fn save_review(
        &self,
        progress: &CharacterProgress,
        stats: &SessionStats,
    ) -> Result<(), StorageError> {
        let stats_json = encode(STATS_KEY, stats)?;
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        upsert_progress(&tx, progress)?;
        kv_put(&tx, STATS_KEY, &stats_json)?;
        tx.commit()?;
        Ok(())
    }
}

/// Progress row with dates still in their stored RFC 3339 form.
struct RawProgress {
    character_id: String,
    rating: u8,
    last_reviewed: String,
    next_review_date: String,
    review_count: u32,
}

impl RawProgress {
    fn decode(self) -> Result<CharacterProgress, StorageError> {
        Ok(CharacterProgress {
            last_reviewed: parse_ts(&self.character_id, &self.last_reviewed)?,
            next_review_date: parse_ts(&self.character_id, &self.next_review_date)?,
            character_id: self.character_id,
            rating: self.rating,
            review_count: self.review_count,
        })
    }
}

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawProgress> {
    Ok(RawProgress {
        character_id: row.get(0)?,
        rating: row.get(1)?,
        last_reviewed: row.get(2)?,
        next_review_date: row.get(3)?,
        review_count: row.get(4)?,
    })
}

fn upsert_progress(
    conn: &Connection,
    progress: &CharacterProgress,
) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT OR REPLACE INTO character_progress
             (character_id, rating, last_reviewed, next_review_date, review_count)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            progress.character_id,
            progress.rating,
            progress.last_reviewed.to_rfc3339(),
            progress.next_review_date.to_rfc3339(),
            progress.review_count,
        ],
    )?;
    Ok(())
}

fn kv_get(conn: &Connection, key: &str) -> Result<Option<String>, rusqlite::Error> {
    let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
    let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
    match result {
        Ok(v) => Ok(Some(v)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

fn kv_put(conn: &Connection, key: &str, value: &str) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

/// Get-or-create read of a kv singleton.
///
/// Runs inside a transaction: the first reader writes the default and
/// every later reader sees that same record.
fn load_singleton<T>(conn: &mut Connection, key: &str) -> Result<T, StorageError>
where
    T: Serialize + DeserializeOwned + Default,
{
    let tx = conn.transaction()?;
    if let Some(json) = kv_get(&tx, key)? {
        let value = decode(key, &json)?;
        tx.commit()?;
        return Ok(value);
    }

    let default = T::default();
    kv_put(&tx, key, &encode(key, &default)?)?;
    tx.commit()?;
    Ok(default)
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|e| StorageError::Corrupt {
        key: key.to_string(),
        message: e.to_string(),
    })
}

fn decode<T: DeserializeOwned>(key: &str, json: &str) -> Result<T, StorageError> {
    serde_json::from_str(json).map_err(|e| StorageError::Corrupt {
        key: key.to_string(),
        message: e.to_string(),
    })
}

fn parse_ts(character_id: &str, value: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Corrupt {
            key: character_id.to_string(),
            message: format!("bad timestamp '{value}': {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn progress(id: &str, review_count: u32) -> CharacterProgress {
        let now = Utc::now();
        CharacterProgress {
            character_id: id.into(),
            rating: 4,
            last_reviewed: now,
            next_review_date: now + Duration::days(7),
            review_count,
        }
    }

    #[tokio::test]
    async fn progress_upsert_and_load() {
        let store = SqliteStore::open_memory().unwrap();
        assert!(store.load_progress("giyeok").await.unwrap().is_none());

        store.save_progress(&progress("giyeok", 1)).await.unwrap();
        let loaded = store.load_progress("giyeok").await.unwrap().unwrap();
        assert_eq!(loaded.review_count, 1);
        assert_eq!(loaded.rating, 4);

        // Upsert mutates in place; no second row appears.
        store.save_progress(&progress("giyeok", 2)).await.unwrap();
        let all = store.load_all_progress().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].review_count, 2);
    }

    #[tokio::test]
    async fn singletons_created_with_defaults_once() {
        let store = SqliteStore::open_memory().unwrap();

        let settings = store.settings().await.unwrap();
        assert_eq!(settings, Settings::default());

        // A mutated save sticks; the default is not re-written.
        let mut changed = settings;
        changed.auto_flip = true;
        store.save_settings(&changed).await.unwrap();
        assert!(store.settings().await.unwrap().auto_flip);

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_reviews, 0);
    }

    #[tokio::test]
    async fn save_review_writes_both_records() {
        let store = SqliteStore::open_memory().unwrap();
        let now = Utc::now();
        let stats = crate::stats::record_rating(&SessionStats::default(), "nieun", 5, now);

        store.save_review(&progress("nieun", 1), &stats).await.unwrap();

        assert!(store.load_progress("nieun").await.unwrap().is_some());
        let stored = store.stats().await.unwrap();
        assert_eq!(stored.total_reviews, 1);
        assert!(stored.mastered_characters.contains("nieun"));
    }

    #[tokio::test]
    async fn reopens_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jamo.db");

        {
            let store = SqliteStore::open_at(&path).unwrap();
            store.save_progress(&progress("mieum", 3)).await.unwrap();
        }

        let store = SqliteStore::open_at(&path).unwrap();
        let loaded = store.load_progress("mieum").await.unwrap().unwrap();
        assert_eq!(loaded.review_count, 3);
    }
}
