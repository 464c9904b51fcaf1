//! Storage layer for ecoart.
//!
//! Persisted state is a set of named slots, each holding one serialized
//! blob (the browser local-storage model). [`SlotStore`] is the seam the
//! catalog persists through; [`Storage`] implements it on `SQLite`.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// A flat key/value store of named slots.
pub trait SlotStore {
    /// Read the value held in a slot, or `None` if the slot is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn read_slot(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value held in a slot, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be written.
    fn write_slot(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a slot. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be written.
    fn remove_slot(&self, key: &str) -> Result<bool>;
}

/// `SQLite`-backed slot storage.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List the keys of every stored slot, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn slot_keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM slots ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails, or
    /// [`Error::Io`] if the database file cannot be inspected.
    pub fn stats(&self) -> Result<StorageStats> {
        let slot_count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM slots", [], |row| row.get(0))?;

        let last_write: Option<String> =
            self.conn
                .query_row("SELECT MAX(updated_at) FROM slots", [], |row| row.get(0))?;

        let last_write = last_write
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path)?.len()
        };

        Ok(StorageStats {
            slot_count,
            last_write,
            db_size_bytes,
        })
    }

    fn stored_hash(&self, key: &str) -> Result<Option<String>> {
        let hash = self
            .conn
            .query_row(
                "SELECT content_hash FROM slots WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(hash)
    }

    /// BLAKE3 hash of a slot value.
    #[must_use]
    pub fn compute_hash(value: &str) -> String {
        blake3::hash(value.as_bytes()).to_hex().to_string()
    }
}

impl SlotStore for Storage {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        debug!(key, found = value.is_some(), "Read slot");
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        let hash = Self::compute_hash(value);
        if self.stored_hash(key)?.as_deref() == Some(hash.as_str()) {
            debug!(key, "Slot unchanged, skipping write");
            return Ok(());
        }

        self.conn.execute(
            r"
            INSERT INTO slots (key, value, content_hash, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                content_hash = excluded.content_hash,
                updated_at = excluded.updated_at
            ",
            params![key, value, hash, Utc::now().to_rfc3339()],
        )?;
        debug!(key, bytes = value.len(), "Wrote slot");
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM slots WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of slots stored.
    pub slot_count: i64,
    /// When any slot was last written.
    pub last_write: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> Storage {
        Storage::open_in_memory().expect("failed to create test storage")
    }

    fn updated_at(storage: &Storage, key: &str) -> String {
        storage
            .conn
            .query_row(
                "SELECT updated_at FROM slots WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn test_open_in_memory() {
        assert!(Storage::open_in_memory().is_ok());
    }

    #[test]
    fn test_read_missing_slot() {
        let storage = create_test_storage();
        assert_eq!(storage.read_slot("artProjects").unwrap(), None);
    }

    #[test]
    fn test_write_and_read_slot() {
        let storage = create_test_storage();
        storage.write_slot("artProjects", "[1,2,3]").unwrap();

        assert_eq!(
            storage.read_slot("artProjects").unwrap().as_deref(),
            Some("[1,2,3]")
        );
    }

    #[test]
    fn test_write_replaces_value() {
        let storage = create_test_storage();
        storage.write_slot("k", "first").unwrap();
        storage.write_slot("k", "second").unwrap();

        assert_eq!(storage.read_slot("k").unwrap().as_deref(), Some("second"));
        assert_eq!(storage.slot_keys().unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn test_unchanged_write_is_skipped() {
        let storage = create_test_storage();
        storage.write_slot("k", "same").unwrap();
        let stamp = updated_at(&storage, "k");

        std::thread::sleep(std::time::Duration::from_millis(5));
        storage.write_slot("k", "same").unwrap();

        assert_eq!(updated_at(&storage, "k"), stamp);
    }

    #[test]
    fn test_remove_slot() {
        let storage = create_test_storage();
        storage.write_slot("k", "v").unwrap();

        assert!(storage.remove_slot("k").unwrap());
        assert!(!storage.remove_slot("k").unwrap());
        assert_eq!(storage.read_slot("k").unwrap(), None);
    }

    #[test]
    fn test_slot_keys_sorted() {
        let storage = create_test_storage();
        storage.write_slot("b", "2").unwrap();
        storage.write_slot("a", "1").unwrap();

        assert_eq!(
            storage.slot_keys().unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_unicode_value() {
        let storage = create_test_storage();
        storage.write_slot("k", "👖 400 denim pieces").unwrap();

        assert_eq!(
            storage.read_slot("k").unwrap().as_deref(),
            Some("👖 400 denim pieces")
        );
    }

    #[test]
    fn test_stats_empty() {
        let storage = create_test_storage();
        let stats = storage.stats().unwrap();

        assert_eq!(stats.slot_count, 0);
        assert!(stats.last_write.is_none());
        assert_eq!(stats.db_size_bytes, 0);
    }

    #[test]
    fn test_stats_with_data() {
        let storage = create_test_storage();
        storage.write_slot("a", "1").unwrap();
        storage.write_slot("b", "2").unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.slot_count, 2);
        assert!(stats.last_write.is_some());
    }

    #[test]
    fn test_compute_hash_consistency() {
        assert_eq!(Storage::compute_hash("x"), Storage::compute_hash("x"));
        assert_ne!(Storage::compute_hash("x"), Storage::compute_hash("y"));
    }

    #[test]
    fn test_path() {
        let storage = create_test_storage();
        assert_eq!(storage.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_open_file_based_persists() {
        let db_path =
            std::env::temp_dir().join(format!("ecoart_storage_test_{}.db", std::process::id()));

        {
            let storage = Storage::open(&db_path).unwrap();
            storage.write_slot("artProjects", "[]").unwrap();
            assert_eq!(storage.path(), db_path);
            assert!(storage.stats().unwrap().db_size_bytes > 0);
        }

        let reopened = Storage::open(&db_path).unwrap();
        assert_eq!(
            reopened.read_slot("artProjects").unwrap().as_deref(),
            Some("[]")
        );

        drop(reopened);
        let _ = std::fs::remove_file(&db_path);
    }

    #[test]
    fn test_stats_reports_missing_database_file() {
        let db_path =
            std::env::temp_dir().join(format!("ecoart_stats_test_{}.db", std::process::id()));
        let _ = std::fs::remove_file(&db_path);

        let storage = Storage::open(&db_path).unwrap();
        std::fs::remove_file(&db_path).unwrap();

        let err = storage.stats().unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{err:?}");
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let root = std::env::temp_dir().join(format!("ecoart_test_{}", std::process::id()));
        let nested_path = root.join("nested/catalog.db");
        let _ = std::fs::remove_dir_all(&root);

        let storage = Storage::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(storage);
        let _ = std::fs::remove_dir_all(&root);
    }
}
