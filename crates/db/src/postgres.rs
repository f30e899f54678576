//! PostgreSQL-backed [`Store`] built on the repository layer.

use async_trait::async_trait;
use cuadrante_core::types::DbId;
use cuadrante_core::{
    ChangeLogRecord, DateKey, Entry, EntryPatch, NewChangeLog, NewUser, User, YearMonth,
};

use crate::error::{classify, StoreError};
use crate::repositories::{ChangeLogRepo, EntryRepo, UserRepo};
use crate::store::{ChangeLogStore, EntryStore, EntryWrite, Store, UserStore};
use crate::DbPool;

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Convert a batch of rows, failing on the first one that no longer decodes.
fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, StoreError>
where
    T: TryFrom<R, Error = cuadrante_core::CoreError>,
{
    rows.into_iter()
        .map(|row| T::try_from(row).map_err(StoreError::from))
        .collect()
}

#[async_trait]
impl EntryStore for PgStore {
    async fn get_entry(&self, key: DateKey) -> Result<Option<Entry>, StoreError> {
        let row = EntryRepo::find_by_date_key(&self.pool, &key.to_string()).await?;
        Ok(row.map(Entry::try_from).transpose()?)
    }

    async fn list_entries(&self, month: YearMonth) -> Result<Vec<Entry>, StoreError> {
        let rows = EntryRepo::list_in_range(
            &self.pool,
            &month.first_key().to_string(),
            &month.last_key().to_string(),
        )
        .await?;
        convert_all(rows)
    }

    async fn upsert_entry(
        &self,
        key: DateKey,
        patch: &EntryPatch,
        editor: &str,
    ) -> Result<EntryWrite, StoreError> {
        let (previous, current) =
            EntryRepo::upsert(&self.pool, &key.to_string(), patch, editor).await?;
        Ok(EntryWrite {
            previous: previous.map(Entry::try_from).transpose()?,
            entry: Entry::try_from(current)?,
        })
    }

    async fn insert_entry(&self, entry: &Entry) -> Result<Entry, StoreError> {
        let row = EntryRepo::create(&self.pool, entry).await.map_err(classify)?;
        Ok(Entry::try_from(row)?)
    }

    async fn delete_entry(&self, key: DateKey) -> Result<Option<Entry>, StoreError> {
        let row = EntryRepo::delete(&self.pool, &key.to_string()).await?;
        Ok(row.map(Entry::try_from).transpose()?)
    }
}

#[async_trait]
impl ChangeLogStore for PgStore {
    async fn append_change(&self, change: NewChangeLog) -> Result<ChangeLogRecord, StoreError> {
        let row = ChangeLogRepo::insert(&self.pool, &change).await?;
        Ok(ChangeLogRecord::try_from(row)?)
    }

    async fn list_changes(&self, month: YearMonth) -> Result<Vec<ChangeLogRecord>, StoreError> {
        let rows =
            ChangeLogRepo::list_in_window(&self.pool, month.starts_at(), month.ends_before())
                .await?;
        convert_all(rows)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, StoreError> {
        let row = UserRepo::create(&self.pool, user).await.map_err(classify)?;
        Ok(User::try_from(row)?)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        convert_all(UserRepo::list(&self.pool).await?)
    }

    async fn find_user_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError> {
        let row = UserRepo::find_by_identifier(&self.pool, identifier).await?;
        Ok(row.map(User::try_from).transpose()?)
    }

    async fn delete_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        let row = UserRepo::delete(&self.pool, id).await?;
        Ok(row.map(User::try_from).transpose()?)
    }

    async fn count_users(&self) -> Result<i64, StoreError> {
        Ok(UserRepo::count(&self.pool).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
