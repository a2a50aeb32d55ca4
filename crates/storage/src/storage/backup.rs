use rusqlite::params;

use super::{Result, Storage, get_conn};
use crate::error::StorageError;

impl Storage {
    /// Consistent snapshot of the whole database as file bytes.
    ///
    /// `VACUUM INTO` a fresh scratch directory so the copy is transactionally
    /// consistent even with WAL enabled. The directory is removed on drop.
    ///
    /// # Errors
    /// Returns error if the snapshot cannot be written or read back.
    pub fn backup_bytes(&self) -> Result<Vec<u8>> {
        let scratch = tempfile::Builder::new()
            .prefix("cloud-hunter-backup-")
            .tempdir()
            .map_err(StorageError::Backup)?;
        // VACUUM INTO refuses an existing file
        let target = scratch.path().join("snapshot.db");

        let conn = get_conn(&self.pool)?;
        conn.execute("VACUUM INTO ?1", params![target.to_string_lossy()])?;
        drop(conn);

        let bytes = std::fs::read(&target).map_err(StorageError::Backup)?;
        tracing::info!(size = bytes.len(), "Database backup created");
        Ok(bytes)
    }
}
