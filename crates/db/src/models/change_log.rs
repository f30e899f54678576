//! Row model for the append-only `change_logs` table. No `updated_at`.

use cuadrante_core::types::{DbId, Timestamp};
use cuadrante_core::{ChangeLogRecord, CoreError, DateKey, Entry};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ChangeLogRow {
    pub id: DbId,
    pub timestamp: Timestamp,
    pub actor: String,
    pub action: String,
    pub entry_date_key: String,
    pub previous_data: Option<Json<Entry>>,
    pub new_data: Option<Json<Entry>>,
}

impl TryFrom<ChangeLogRow> for ChangeLogRecord {
    type Error = CoreError;

    fn try_from(row: ChangeLogRow) -> Result<Self, Self::Error> {
        Ok(ChangeLogRecord {
            id: row.id,
            timestamp: row.timestamp,
            user: row.actor,
            action: row.action.parse()?,
            entry_date_key: DateKey::parse(&row.entry_date_key)?,
            previous_data: row.previous_data.map(|Json(entry)| entry),
            new_data: row.new_data.map(|Json(entry)| entry),
        })
    }
}
