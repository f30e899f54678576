//! Repository for the append-only `change_logs` table.

use cuadrante_core::types::Timestamp;
use cuadrante_core::NewChangeLog;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::change_log::ChangeLogRow;

/// Column list for `change_logs` SELECT queries.
const COLUMNS: &str = "id, timestamp, actor, action, entry_date_key, previous_data, new_data";

/// Provides append and query operations for the change log.
pub struct ChangeLogRepo;

impl ChangeLogRepo {
    /// Append one record. `id` and `timestamp` are assigned by the database.
    pub async fn insert(pool: &PgPool, change: &NewChangeLog) -> Result<ChangeLogRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO change_logs (actor, action, entry_date_key, previous_data, new_data)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChangeLogRow>(&query)
            .bind(&change.user)
            .bind(change.action.as_str())
            .bind(change.entry_date_key.to_string())
            .bind(change.previous_data.as_ref().map(Json))
            .bind(change.new_data.as_ref().map(Json))
            .fetch_one(pool)
            .await
    }

    /// Records written in `[from, to)`, newest first.
    pub async fn list_in_window(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<ChangeLogRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM change_logs
             WHERE timestamp >= $1 AND timestamp < $2
             ORDER BY timestamp DESC, id DESC"
        );
        sqlx::query_as::<_, ChangeLogRow>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}
