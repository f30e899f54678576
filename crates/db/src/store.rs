//! Storage contracts for entries, the change log and users.
//!
//! The API holds an `Arc<dyn Store>`; [`MemoryStore`](crate::MemoryStore)
//! and [`PgStore`](crate::PgStore) are the two backends.

use async_trait::async_trait;
use cuadrante_core::types::DbId;
use cuadrante_core::{
    ChangeLogRecord, DateKey, Entry, EntryPatch, NewChangeLog, NewUser, User, YearMonth,
};

use crate::error::StoreError;

/// Outcome of an upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryWrite {
    /// The record this write replaced, `None` if the date had none.
    pub previous: Option<Entry>,
    /// The record after the write.
    pub entry: Entry,
}

/// One record per calendar date.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn get_entry(&self, key: DateKey) -> Result<Option<Entry>, StoreError>;

    /// Entries with keys in `[month.first_key(), month.last_key()]`, ordered
    /// by key.
    async fn list_entries(&self, month: YearMonth) -> Result<Vec<Entry>, StoreError>;

    /// Create the record if absent, otherwise replace the fields supplied in
    /// `patch`. Always stamps `editor`.
    ///
    /// Both snapshots in the returned [`EntryWrite`] belong to this one
    /// write: no other write to `key` can land between them.
    async fn upsert_entry(
        &self,
        key: DateKey,
        patch: &EntryPatch,
        editor: &str,
    ) -> Result<EntryWrite, StoreError>;

    /// Insert a full entry. Fails with [`StoreError::Duplicate`] if the date
    /// already has one.
    async fn insert_entry(&self, entry: &Entry) -> Result<Entry, StoreError>;

    /// Remove the record, returning the pre-delete snapshot.
    async fn delete_entry(&self, key: DateKey) -> Result<Option<Entry>, StoreError>;
}

/// Append-only audit trail.
#[async_trait]
pub trait ChangeLogStore: Send + Sync {
    /// Store the record verbatim, assigning `id` and `timestamp`.
    async fn append_change(&self, change: NewChangeLog) -> Result<ChangeLogRecord, StoreError>;

    /// Records whose own timestamp falls within `month`, newest first.
    async fn list_changes(&self, month: YearMonth) -> Result<Vec<ChangeLogRecord>, StoreError>;
}

/// Team members.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::Duplicate`] on a taken name or identifier.
    async fn create_user(&self, user: &NewUser) -> Result<User, StoreError>;

    /// All users in creation order.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn find_user_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError>;

    /// Remove a user, returning the deleted row.
    async fn delete_user(&self, id: DbId) -> Result<Option<User>, StoreError>;

    async fn count_users(&self) -> Result<i64, StoreError>;
}

/// Everything the application needs from persistence.
#[async_trait]
pub trait Store: EntryStore + ChangeLogStore + UserStore {
    /// Cheap reachability check used by `/health`.
    async fn health_check(&self) -> Result<(), StoreError>;
}
