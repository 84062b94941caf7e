use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::error::{Result, StoreError};

mod attendance;
mod workers;

const SCHEMA: [&str; 5] = [
    r#"
    CREATE TABLE IF NOT EXISTS workers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        role TEXT NOT NULL,
        email TEXT,
        phone TEXT,
        hourly_rate REAL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attendance_records (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        worker_id INTEGER NOT NULL,
        date TEXT NOT NULL,
        check_in_time TEXT,
        check_out_time TEXT,
        hours_worked REAL NOT NULL DEFAULT 0,
        status TEXT NOT NULL
            CHECK (status IN ('present', 'absent', 'late', 'half-day')),
        notes TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        FOREIGN KEY (worker_id) REFERENCES workers (id) ON DELETE CASCADE,
        UNIQUE (worker_id, date)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance_records (date)",
    "CREATE INDEX IF NOT EXISTS idx_attendance_worker ON attendance_records (worker_id)",
    "CREATE INDEX IF NOT EXISTS idx_attendance_status ON attendance_records (status)",
];

/// Handle to the attendance database.
///
/// A `Store` starts closed. Every query made before [`Store::open`] or after
/// [`Store::close`] fails with [`StoreError::NotInitialized`]. The pool holds a
/// single connection, so writes are applied one at a time.
pub struct Store {
    database_url: String,
    pool: RwLock<Option<SqlitePool>>,
}

impl Store {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool: RwLock::new(None),
        }
    }

    /// A private database that lives as long as the store stays open.
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }

    /// Connects and creates the tables if they are missing. Opening an
    /// already open store is a no-op.
    pub async fn open(&self) -> Result<()> {
        if self.is_open() {
            return Ok(());
        }

        let options = SqliteConnectOptions::from_str(&self.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // an in-memory database disappears with its connection, keep it alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }

        *self.pool.write().unwrap_or_else(PoisonError::into_inner) = Some(pool);
        info!(url = %self.database_url, "Attendance store opened");
        Ok(())
    }

    /// Closes the connection. Later calls fail with `NotInitialized` until
    /// the store is opened again.
    pub async fn close(&self) {
        let pool = self
            .pool
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(pool) = pool {
            pool.close().await;
            info!(url = %self.database_url, "Attendance store closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub(crate) fn pool(&self) -> Result<SqlitePool> {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(StoreError::NotInitialized)
    }
}

/// Builds and opens the store for `database_url`.
pub async fn init_db(database_url: &str) -> Result<Store> {
    let store = Store::new(database_url);
    store.open().await?;
    Ok(store)
}
