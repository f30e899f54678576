//! Entry reads and writes, with change logging and broadcast.

use std::sync::Arc;

use cuadrante_core::entry::require_editor;
use cuadrante_core::report::{build_report, ReportItem};
use cuadrante_core::{ChangeLogRecord, DateKey, Entry, EntryPatch, NewChangeLog, YearMonth};
use cuadrante_db::{EntryWrite, Store};
use cuadrante_events::{EventBus, SyncEvent};

use crate::error::{AppError, AppResult};

pub struct CalendarEngine {
    store: Arc<dyn Store>,
    bus: Arc<EventBus>,
}

impl CalendarEngine {
    pub fn new(store: Arc<dyn Store>, bus: Arc<EventBus>) -> Self {
        Self { store, bus }
    }

    pub async fn get(&self, key: DateKey) -> AppResult<Entry> {
        self.store
            .get_entry(key)
            .await?
            .ok_or_else(|| AppError::not_found("Entry", key))
    }

    pub async fn list_month(&self, month: YearMonth) -> AppResult<Vec<Entry>> {
        Ok(self.store.list_entries(month).await?)
    }

    /// Create or merge the entry for `key`.
    ///
    /// Logged as `create` when no entry existed, otherwise as `update` with
    /// both snapshots, even if nothing changed.
    pub async fn upsert(&self, key: DateKey, patch: &EntryPatch) -> AppResult<Entry> {
        let editor = patch.require_editor()?;

        let EntryWrite { previous, entry } = self.store.upsert_entry(key, patch, editor).await?;

        let change = match previous {
            Some(previous) => NewChangeLog::updated(editor, previous, entry.clone()),
            None => NewChangeLog::created(editor, entry.clone()),
        };
        let record = self.store.append_change(change).await?;

        tracing::info!(
            date_key = %key,
            editor,
            action = %record.action,
            change_id = record.id,
            "Entry saved"
        );
        self.bus.publish(SyncEvent::EntryUpserted(entry.clone()));
        Ok(entry)
    }

    /// Create a full entry. Fails with a conflict if the date already has one.
    pub async fn create(&self, entry: Entry) -> AppResult<Entry> {
        let editor = require_editor(Some(&entry.editor))?.to_string();
        let entry = Entry { editor, ..entry };

        let created = self.store.insert_entry(&entry).await?;
        let record = self
            .store
            .append_change(NewChangeLog::created(created.editor.clone(), created.clone()))
            .await?;

        tracing::info!(
            date_key = %created.date_key,
            editor = %created.editor,
            change_id = record.id,
            "Entry created"
        );
        self.bus.publish(SyncEvent::EntryUpserted(created.clone()));
        Ok(created)
    }

    /// Remove the entry for `key`. A missing entry is `NotFound` and leaves
    /// the log untouched.
    pub async fn delete(&self, key: DateKey) -> AppResult<Entry> {
        let removed = self
            .store
            .delete_entry(key)
            .await?
            .ok_or_else(|| AppError::not_found("Entry", key))?;

        let record = self
            .store
            .append_change(NewChangeLog::deleted(removed.clone()))
            .await?;

        tracing::info!(date_key = %key, change_id = record.id, "Entry deleted");
        self.bus.publish(SyncEvent::EntryDeleted(key));
        Ok(removed)
    }

    /// Change log records written during `month`, newest first.
    pub async fn logs(&self, month: YearMonth) -> AppResult<Vec<ChangeLogRecord>> {
        Ok(self.store.list_changes(month).await?)
    }

    /// [`logs`](Self::logs) annotated with field-level diffs.
    pub async fn report(&self, month: YearMonth) -> AppResult<Vec<ReportItem>> {
        Ok(build_report(self.logs(month).await?))
    }
}
