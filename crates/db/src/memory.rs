//! In-process store used by tests and database-less runs.
//!
//! Entries live in a `BTreeMap` keyed by [`DateKey`], so a month listing is
//! a plain range scan. The change log is a `Vec` in insertion order with
//! timestamps clamped to be non-decreasing.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use cuadrante_core::types::{DbId, Timestamp};
use cuadrante_core::{
    ChangeLogRecord, DateKey, Entry, EntryPatch, NewChangeLog, NewUser, User, YearMonth,
};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::{ChangeLogStore, EntryStore, EntryWrite, Store, UserStore};

/// Source of change log timestamps.
pub type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

#[derive(Default)]
struct Inner {
    entries: BTreeMap<DateKey, Entry>,
    changes: Vec<ChangeLogRecord>,
    users: BTreeMap<DbId, User>,
    next_change_id: DbId,
    next_user_id: DbId,
}

pub struct MemoryStore {
    inner: RwLock<Inner>,
    clock: Clock,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }

    /// Use `clock` instead of the wall clock for change log timestamps.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            clock,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn get_entry(&self, key: DateKey) -> Result<Option<Entry>, StoreError> {
        Ok(self.inner.read().await.entries.get(&key).cloned())
    }

    async fn list_entries(&self, month: YearMonth) -> Result<Vec<Entry>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .entries
            .range(month.first_key()..=month.last_key())
            .map(|(_, entry)| entry.clone())
            .collect())
    }

    async fn upsert_entry(
        &self,
        key: DateKey,
        patch: &EntryPatch,
        editor: &str,
    ) -> Result<EntryWrite, StoreError> {
        let mut inner = self.inner.write().await;
        let previous = inner.entries.get(&key).cloned();
        let mut entry = previous.clone().unwrap_or_else(|| Entry::blank(key));
        entry.apply(patch, editor);
        inner.entries.insert(key, entry.clone());
        Ok(EntryWrite { previous, entry })
    }

    async fn insert_entry(&self, entry: &Entry) -> Result<Entry, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.entries.contains_key(&entry.date_key) {
            return Err(StoreError::Duplicate(format!(
                "entry for {} already exists",
                entry.date_key
            )));
        }
        inner.entries.insert(entry.date_key, entry.clone());
        Ok(entry.clone())
    }

    async fn delete_entry(&self, key: DateKey) -> Result<Option<Entry>, StoreError> {
        Ok(self.inner.write().await.entries.remove(&key))
    }
}

#[async_trait]
impl ChangeLogStore for MemoryStore {
    async fn append_change(&self, change: NewChangeLog) -> Result<ChangeLogRecord, StoreError> {
        let mut inner = self.inner.write().await;
        let now = (self.clock)();
        let timestamp = match inner.changes.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };
        inner.next_change_id += 1;
        let record = change.into_record(inner.next_change_id, timestamp);
        inner.changes.push(record.clone());
        Ok(record)
    }

    async fn list_changes(&self, month: YearMonth) -> Result<Vec<ChangeLogRecord>, StoreError> {
        let (from, to) = (month.starts_at(), month.ends_before());
        let inner = self.inner.read().await;
        Ok(inner
            .changes
            .iter()
            .rev()
            .filter(|record| record.timestamp >= from && record.timestamp < to)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(taken) = inner
            .users
            .values()
            .find(|u| u.name == user.name || u.identifier == user.identifier)
        {
            let what = if taken.name == user.name {
                "name"
            } else {
                "identifier"
            };
            return Err(StoreError::Duplicate(format!("user {what} is already taken")));
        }

        inner.next_user_id += 1;
        let created = User {
            id: inner.next_user_id,
            name: user.name.clone(),
            identifier: user.identifier.clone(),
            role: user.role,
        };
        inner.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn find_user_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.identifier == identifier)
            .cloned())
    }

    async fn delete_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(self.inner.write().await.users.remove(&id))
    }

    async fn count_users(&self) -> Result<i64, StoreError> {
        let count = self.inner.read().await.users.len();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
