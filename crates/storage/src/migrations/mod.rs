#![allow(
    clippy::redundant_pub_crate,
    reason = "migrations module is private, pub(crate) is intentional"
)]

mod v1;
mod v2;
mod v3;

use rusqlite::Connection;

pub const SCHEMA_VERSION: i32 = 3;

/// Bring the schema up to [`SCHEMA_VERSION`].
///
/// v1 uses `CREATE TABLE IF NOT EXISTS` with the column layout of the
/// pre-versioned database, so an old unversioned `clouds.db` is adopted in
/// place; v3 then re-keys its rows by SHA-256.
pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::info!("Database schema version: {} (target: {})", current_version, SCHEMA_VERSION);

    if current_version < 1i32 {
        tracing::info!("Running migration v1: history table");
        conn.execute_batch(v1::SQL)?;
    }

    if current_version < 2i32 {
        tracing::info!("Running migration v2: cloud_name index");
        conn.execute_batch(v2::SQL)?;
    }

    if current_version < 3i32 {
        let changed = v3::run(conn)?;
        tracing::info!(changed, "Ran migration v3: SHA-256 image keys");
    }

    if current_version < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    }

    Ok(())
}
