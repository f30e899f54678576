//! Row model for the `calendar_entries` table.

use cuadrante_core::{CoreError, DateKey, Entry};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct EntryRow {
    pub date_key: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub editor: String,
    pub image_urls: Vec<String>,
}

impl TryFrom<EntryRow> for Entry {
    type Error = CoreError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        Ok(Entry {
            date_key: DateKey::parse(&row.date_key)?,
            name: row.name,
            address: row.address,
            phone: row.phone,
            editor: row.editor,
            image_urls: row.image_urls,
        })
    }
}
