//! Migration v3: re-key every stored image by its SHA-256 fingerprint
//!
//! Databases adopted from before versioning carry MD5 hex in `image_hash`, so a
//! byte-identical re-upload would not be recognised as a duplicate.

use cloud_hunter_core::fingerprint;
use rusqlite::{Connection, ErrorCode, params};

/// Returns the number of rows whose key changed.
pub(super) fn run(conn: &Connection) -> Result<usize, rusqlite::Error> {
    let tx = conn.unchecked_transaction()?;

    let rekeys: Vec<(i64, Option<String>, String)> = {
        let mut stmt = tx.prepare(
            "SELECT id, image_hash, image_data FROM history WHERE typeof(image_data) = 'blob'",
        )?;
        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let old: Option<String> = row.get(1)?;
            let data: Vec<u8> = row.get(2)?;
            Ok((id, old, fingerprint(&data)))
        })?;
        rows.filter_map(|r| match r {
            Ok((id, old, new)) if old.as_deref() != Some(new.as_str()) => Some(Ok((id, old, new))),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .collect::<Result<_, _>>()?
    };

    let mut changed = 0usize;
    {
        let mut stmt = tx.prepare("UPDATE history SET image_hash = ?1 WHERE id = ?2")?;
        for (id, old, new) in &rekeys {
            match stmt.execute(params![new, id]) {
                Ok(n) => changed += n,
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == ErrorCode::ConstraintViolation =>
                {
                    tracing::warn!(id, old = ?old, "Same image stored twice, keeping legacy key");
                },
                Err(e) => return Err(e),
            }
        }
    }
    tx.commit()?;
    Ok(changed)
}
