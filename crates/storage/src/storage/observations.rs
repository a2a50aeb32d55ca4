use chrono::Utc;
use cloud_hunter_core::{CloudObservation, NewObservation, ObservationEntry};
use rusqlite::{OptionalExtension as _, params};

use super::{ENTRY_COLUMNS, Result, Storage, get_conn, log_row_error, row_to_entry};
use crate::error::StorageError;

impl Storage {
    /// Insert a sighting.
    ///
    /// Returns the new row id, or `None` when a row with the same
    /// `image_hash` already exists. Duplicates are rejected by the UNIQUE
    /// constraint, so two racing inserts of the same image cannot both land.
    ///
    /// # Errors
    /// Returns error if the database insert fails for any other reason.
    pub fn insert_observation(&self, obs: &NewObservation) -> Result<Option<i64>> {
        let conn = get_conn(&self.pool)?;
        let inserted = conn.execute(
            "INSERT INTO history
               (cloud_name, tier, score, science_fact, weather_tip, image_data, image_hash, timestamp)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                obs.cloud_name,
                obs.tier.as_str(),
                obs.score,
                obs.science_fact,
                obs.weather_tip,
                obs.image_data,
                obs.image_hash,
                Utc::now().to_rfc3339(),
            ],
        );
        match inserted.map_err(StorageError::from) {
            Ok(_) => Ok(Some(conn.last_insert_rowid())),
            Err(StorageError::Duplicate(msg)) => {
                tracing::debug!(hash = %obs.image_hash, %msg, "Insert rejected by fingerprint constraint");
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }

    /// Sighting with the given fingerprint, without its image.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_entry_by_hash(&self, image_hash: &str) -> Result<Option<ObservationEntry>> {
        let conn = get_conn(&self.pool)?;
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM history WHERE image_hash = ?1");
        Ok(conn.query_row(&sql, params![image_hash], row_to_entry).optional()?)
    }

    /// Sighting by id, without its image.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_entry(&self, id: i64) -> Result<Option<ObservationEntry>> {
        let conn = get_conn(&self.pool)?;
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM history WHERE id = ?1");
        Ok(conn.query_row(&sql, params![id], row_to_entry).optional()?)
    }

    /// Full sighting by id, including the original upload bytes.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_observation(&self, id: i64) -> Result<Option<CloudObservation>> {
        let conn = get_conn(&self.pool)?;
        let sql = format!("SELECT {ENTRY_COLUMNS}, image_data FROM history WHERE id = ?1");
        let found = conn
            .query_row(&sql, params![id], |row| {
                let entry = row_to_entry(row)?;
                let image_data: Option<Vec<u8>> = row.get(8)?;
                Ok(CloudObservation { entry, image_data: image_data.unwrap_or_default() })
            })
            .optional()?;
        Ok(found)
    }

    /// Original upload bytes of a sighting.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_image(&self, id: i64) -> Result<Option<Vec<u8>>> {
        let conn = get_conn(&self.pool)?;
        let image: Option<Option<Vec<u8>>> = conn
            .query_row("SELECT image_data FROM history WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(image.map(Option::unwrap_or_default))
    }

    /// Whether any row already carries this exact species label.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn species_seen(&self, cloud_name: &str) -> Result<bool> {
        let conn = get_conn(&self.pool)?;
        let seen: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM history WHERE cloud_name = ?1)",
            params![cloud_name],
            |row| row.get(0),
        )?;
        Ok(seen)
    }

    /// Every sighting without images, newest first.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_entries(&self) -> Result<Vec<ObservationEntry>> {
        let conn = get_conn(&self.pool)?;
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM history ORDER BY id DESC");
        let mut stmt = conn.prepare(&sql)?;
        let results = stmt.query_map([], row_to_entry)?.filter_map(log_row_error).collect();
        Ok(results)
    }

    /// Sightings of one species, newest first.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn species_entries(&self, cloud_name: &str) -> Result<Vec<ObservationEntry>> {
        let conn = get_conn(&self.pool)?;
        let sql =
            format!("SELECT {ENTRY_COLUMNS} FROM history WHERE cloud_name = ?1 ORDER BY id DESC");
        let mut stmt = conn.prepare(&sql)?;
        let results =
            stmt.query_map(params![cloud_name], row_to_entry)?.filter_map(log_row_error).collect();
        Ok(results)
    }

    /// Number of stored sightings.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn count_observations(&self) -> Result<usize> {
        let conn = get_conn(&self.pool)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete exactly one sighting.
    ///
    /// # Errors
    /// Returns `NotFound` if no row has this id, or a database error.
    pub fn delete_observation(&self, id: i64) -> Result<()> {
        let conn = get_conn(&self.pool)?;
        let deleted = conn.execute("DELETE FROM history WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(StorageError::NotFound { entity: "observation", id: id.to_string() });
        }
        tracing::info!(id, "Deleted observation");
        Ok(())
    }
}
