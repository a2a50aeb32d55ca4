//! `SQLite` storage implementation.
//!
//! All methods are synchronous; async callers wrap them in `spawn_blocking`.

// SQLite uses i64 for counts and ids, Rust uses usize for lengths
#![allow(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "SQLite i64 <-> Rust usize conversions are safe within DB row counts"
)]

mod backup;
mod observations;
mod repair;

use chrono::{DateTime, NaiveDateTime, Utc};
use cloud_hunter_core::{ObservationEntry, Tier, env_parse_with_default};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::migrations;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Columns of [`ObservationEntry`] in mapping order.
pub(crate) const ENTRY_COLUMNS: &str =
    "id, cloud_name, tier, score, science_fact, weather_tip, image_hash, timestamp";

/// Main storage struct wrapping the `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
    pub(crate) db_path: PathBuf,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn> {
    Ok(pool.get()?)
}

/// Log row read errors and filter them out
pub(crate) fn log_row_error<T>(result: rusqlite::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Row read error: {}", e);
            None
        },
    }
}

/// Parse a stored timestamp.
///
/// Rows written by this crate hold RFC 3339; rows from the unversioned
/// database carry SQLite's `CURRENT_TIMESTAMP` text (`YYYY-MM-DD HH:MM:SS`, UTC).
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Map a row selected with [`ENTRY_COLUMNS`].
///
/// NULL text columns (possible in the unversioned schema) read as empty, an
/// unreadable tier as `N`, a NULL score as 0.
pub(crate) fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<ObservationEntry> {
    let tier: Option<String> = row.get(2)?;
    let timestamp: Option<String> = row.get(7)?;
    let created_at = match timestamp.as_deref() {
        Some(raw) => parse_timestamp(raw).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                7,
                rusqlite::types::Type::Text,
                format!("unrecognised timestamp: {raw}").into(),
            )
        })?,
        None => DateTime::<Utc>::UNIX_EPOCH,
    };
    Ok(ObservationEntry {
        id: row.get(0)?,
        cloud_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        tier: Tier::normalize(tier.as_deref()),
        score: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
        science_fact: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        weather_tip: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        image_hash: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        created_at,
    })
}

/// Connection initializer for concurrency settings
fn init_connection(conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

fn db_pool_size() -> u32 {
    env_parse_with_default("CLOUD_HUNTER_DB_POOL_SIZE", 4_u32).max(1)
}

impl Storage {
    /// Open (or create) the database at `db_path` and run migrations.
    ///
    /// # Errors
    /// Returns an error if the pool cannot be built or a migration fails.
    pub fn new(db_path: &Path) -> Result<Self> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);

        let pool_size = db_pool_size();
        let pool = Pool::builder().max_size(pool_size).build(manager)?;

        // Run migrations on first connection
        let conn = pool.get()?;
        migrations::run_migrations(&conn)?;
        drop(conn);

        tracing::info!(pool_size, path = %db_path.display(), "Storage initialized with connection pool");

        Ok(Self { pool, db_path: db_path.to_path_buf() })
    }

    /// Path of the backing database file.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
