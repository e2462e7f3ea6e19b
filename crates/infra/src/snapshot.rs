//! Full-snapshot key-value persistence.
//!
//! One named key holds the complete serialized working set; every write
//! replaces the whole value. Backends: SQLite for the real tool, an
//! in-memory map for tests/dev.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

/// Snapshot persistence error.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("failed to prepare snapshot location: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlx::Error> for SnapshotError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Durable store of full snapshots, addressed by key.
///
/// A save is an atomic replace of the whole value under its key; readers
/// never observe a partial write.
pub trait SnapshotStore: Send + Sync {
    /// Read the snapshot under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError>;

    /// Replace the snapshot under `key`.
    fn save(&self, key: &str, payload: &str) -> Result<(), SnapshotError>;
}

/// In-memory snapshot store for tests/dev.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// observe what the store under test persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    values: Arc<RwLock<HashMap<String, String>>>,
    saves: Arc<AtomicUsize>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value before the store under test opens.
    pub fn seed(&self, key: &str, payload: &str) {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), payload.to_string());
    }

    /// Current value under `key`.
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.values.read().unwrap().get(key).cloned()
    }

    /// Number of saves observed since creation.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        Ok(self.values.read().unwrap().get(key).cloned())
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), SnapshotError> {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), payload.to_string());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// SQLite-backed snapshot store.
///
/// The public API is synchronous; a private current-thread runtime drives
/// the sqlx calls to completion. The tool itself is single-threaded and
/// every operation runs to completion before the next begins.
#[derive(Debug)]
pub struct SqliteSnapshotStore {
    rt: tokio::runtime::Runtime,
    pool: SqlitePool,
}

impl SqliteSnapshotStore {
    /// Open (creating if missing) the snapshot database at `db_path`.
    pub fn open(db_path: &Path) -> Result<Self, SnapshotError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| SnapshotError::Storage(err.to_string()))?;

        let pool = rt.block_on(async {
            let options = SqliteConnectOptions::new()
                .filename(db_path)
                .create_if_missing(true);
            let pool = SqlitePoolOptions::new().connect_with(options).await?;

            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS snapshots (
                    key      TEXT NOT NULL PRIMARY KEY,
                    data     TEXT NOT NULL,
                    saved_at TEXT NOT NULL
                )
                "#,
            )
            .execute(&pool)
            .await?;

            Ok::<_, sqlx::Error>(pool)
        })?;

        tracing::debug!(path = %db_path.display(), "snapshot database ready");
        Ok(Self { rt, pool })
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        let row = self.rt.block_on(async {
            sqlx::query(
                r#"
                SELECT data
                FROM snapshots
                WHERE key = ?1
                "#,
            )
            .bind(key)
            .fetch_optional(&self.pool)
            .await
        })?;

        let Some(row) = row else {
            return Ok(None);
        };
        let data: String = row.try_get("data")?;
        Ok(Some(data))
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), SnapshotError> {
        let saved_at = Utc::now().to_rfc3339();

        self.rt.block_on(async {
            sqlx::query(
                r#"
                INSERT INTO snapshots (key, data, saved_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key)
                DO UPDATE SET
                    data = excluded.data,
                    saved_at = excluded.saved_at
                "#,
            )
            .bind(key)
            .bind(payload)
            .bind(saved_at)
            .execute(&self.pool)
            .await
        })?;

        Ok(())
    }
}

/// Resolve the default snapshot database path:
/// `{app_data_dir}/stocktake/stocktake.db`.
pub fn default_db_path() -> Result<PathBuf, SnapshotError> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .ok_or_else(|| SnapshotError::Storage("failed to resolve OS app data directory".into()))?;

    let mut dir = base;
    dir.push("stocktake");
    dir.push("stocktake.db");
    Ok(dir)
}
