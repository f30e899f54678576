//! Repository for the `calendar_entries` table.

use cuadrante_core::{Entry, EntryPatch};
use sqlx::PgPool;

use crate::models::entry::EntryRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "date_key, name, address, phone, editor, image_urls";

/// Provides CRUD operations for calendar entries.
pub struct EntryRepo;

impl EntryRepo {
    /// Find the entry for a date key.
    pub async fn find_by_date_key(
        pool: &PgPool,
        date_key: &str,
    ) -> Result<Option<EntryRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM calendar_entries WHERE date_key = $1");
        sqlx::query_as::<_, EntryRow>(&query)
            .bind(date_key)
            .fetch_optional(pool)
            .await
    }

    /// List entries whose key lies in `[first_key, last_key]`.
    ///
    /// Keys are zero-padded, so byte-wise (`"C"` collation) text comparison
    /// is calendar order.
    pub async fn list_in_range(
        pool: &PgPool,
        first_key: &str,
        last_key: &str,
    ) -> Result<Vec<EntryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM calendar_entries
             WHERE date_key COLLATE \"C\" >= $1 AND date_key COLLATE \"C\" <= $2
             ORDER BY date_key COLLATE \"C\""
        );
        sqlx::query_as::<_, EntryRow>(&query)
            .bind(first_key)
            .bind(last_key)
            .fetch_all(pool)
            .await
    }

    /// Insert or update, returning the row as it was before the write and
    /// after it. Only non-`None` patch fields overwrite stored values;
    /// `editor` is always written.
    ///
    /// The row is locked for the whole transaction, so the prior snapshot
    /// is exactly the state this write replaced even when writes race.
    pub async fn upsert(
        pool: &PgPool,
        date_key: &str,
        patch: &EntryPatch,
        editor: &str,
    ) -> Result<(Option<EntryRow>, EntryRow), sqlx::Error> {
        let mut tx = pool.begin().await?;

        // A concurrent insert of the same key makes this wait until that
        // transaction ends, then do nothing.
        let inserted: Option<String> = sqlx::query_scalar(
            "INSERT INTO calendar_entries (date_key) VALUES ($1) \
             ON CONFLICT (date_key) DO NOTHING \
             RETURNING date_key",
        )
        .bind(date_key)
        .fetch_optional(&mut *tx)
        .await?;

        let previous = match inserted {
            Some(_) => None,
            None => {
                let lock_query = format!(
                    "SELECT {COLUMNS} FROM calendar_entries WHERE date_key = $1 FOR UPDATE"
                );
                sqlx::query_as::<_, EntryRow>(&lock_query)
                    .bind(date_key)
                    .fetch_optional(&mut *tx)
                    .await?
            }
        };

        let update_query = format!(
            "UPDATE calendar_entries SET \
                name = COALESCE($2, name), \
                address = COALESCE($3, address), \
                phone = COALESCE($4, phone), \
                editor = $5, \
                image_urls = COALESCE($6, image_urls), \
                updated_at = NOW() \
             WHERE date_key = $1 \
             RETURNING {COLUMNS}"
        );
        let current = sqlx::query_as::<_, EntryRow>(&update_query)
            .bind(date_key)
            .bind(&patch.name)
            .bind(&patch.address)
            .bind(&patch.phone)
            .bind(editor)
            .bind(&patch.image_urls)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((previous, current))
    }

    /// Insert a full entry, returning the created row.
    pub async fn create(pool: &PgPool, entry: &Entry) -> Result<EntryRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO calendar_entries (date_key, name, address, phone, editor, image_urls)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EntryRow>(&query)
            .bind(entry.date_key.to_string())
            .bind(&entry.name)
            .bind(&entry.address)
            .bind(&entry.phone)
            .bind(&entry.editor)
            .bind(&entry.image_urls)
            .fetch_one(pool)
            .await
    }

    /// Delete an entry, returning the removed row if it existed.
    pub async fn delete(pool: &PgPool, date_key: &str) -> Result<Option<EntryRow>, sqlx::Error> {
        let query = format!("DELETE FROM calendar_entries WHERE date_key = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, EntryRow>(&query)
            .bind(date_key)
            .fetch_optional(pool)
            .await
    }
}
