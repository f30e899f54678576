//! Audit records of entry mutations.
//!
//! Records are append-only and store raw before/after snapshots. Field-level
//! differences are derived when reading (see [`crate::report`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::entry::Entry;
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Actor recorded when the request does not identify one (deletes).
pub const UNKNOWN_ACTOR: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Create,
    Update,
    Delete,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(CoreError::Validation(format!("Unknown change action '{other}'"))),
        }
    }
}

/// A stored change log record. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogRecord {
    pub id: DbId,
    /// When the change was made. Month reports filter on this, not on
    /// `entry_date_key`.
    pub timestamp: Timestamp,
    pub user: String,
    pub action: ChangeAction,
    pub entry_date_key: DateKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_data: Option<Entry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_data: Option<Entry>,
}

/// A change log record before the store assigns `id` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChangeLog {
    pub user: String,
    pub action: ChangeAction,
    pub entry_date_key: DateKey,
    pub previous_data: Option<Entry>,
    pub new_data: Option<Entry>,
}

impl NewChangeLog {
    /// First write to a date: no previous snapshot.
    pub fn created(actor: impl Into<String>, entry: Entry) -> Self {
        Self {
            user: actor.into(),
            action: ChangeAction::Create,
            entry_date_key: entry.date_key,
            previous_data: None,
            new_data: Some(entry),
        }
    }

    pub fn updated(actor: impl Into<String>, previous: Entry, next: Entry) -> Self {
        Self {
            user: actor.into(),
            action: ChangeAction::Update,
            entry_date_key: next.date_key,
            previous_data: Some(previous),
            new_data: Some(next),
        }
    }

    /// Deletes carry no actor, so the record is attributed to
    /// [`UNKNOWN_ACTOR`].
    pub fn deleted(previous: Entry) -> Self {
        Self {
            user: UNKNOWN_ACTOR.to_string(),
            action: ChangeAction::Delete,
            entry_date_key: previous.date_key,
            previous_data: Some(previous),
            new_data: None,
        }
    }

    /// Attach store-assigned identity.
    pub fn into_record(self, id: DbId, timestamp: Timestamp) -> ChangeLogRecord {
        ChangeLogRecord {
            id,
            timestamp,
            user: self.user,
            action: self.action,
            entry_date_key: self.entry_date_key,
            previous_data: self.previous_data,
            new_data: self.new_data,
        }
    }
}
