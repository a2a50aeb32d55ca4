use cloud_hunter_core::{ScoreCorrection, ScoreRow};
use rusqlite::params;

use super::{Result, Storage, get_conn, log_row_error};

impl Storage {
    /// Score-relevant columns of every row, as stored.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn score_rows(&self) -> Result<Vec<ScoreRow>> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare("SELECT id, cloud_name, score, tier FROM history ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ScoreRow {
                    id: row.get(0)?,
                    cloud_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    score: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
                    tier: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                })
            })?
            .filter_map(log_row_error)
            .collect();
        Ok(rows)
    }

    /// Apply score/tier corrections in one transaction.
    ///
    /// Returns the number of rows actually updated; ids that vanished since
    /// planning are skipped.
    ///
    /// # Errors
    /// Returns error if any update fails; the transaction is rolled back.
    pub fn apply_corrections(&self, corrections: &[ScoreCorrection]) -> Result<usize> {
        if corrections.is_empty() {
            return Ok(0);
        }
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;
        let mut updated = 0usize;
        {
            let mut stmt = tx.prepare("UPDATE history SET score = ?1, tier = ?2 WHERE id = ?3")?;
            for fix in corrections {
                updated += stmt.execute(params![fix.score, fix.tier.as_str(), fix.id])?;
            }
        }
        tx.commit()?;
        tracing::info!(updated, "Applied score corrections");
        Ok(updated)
    }
}
