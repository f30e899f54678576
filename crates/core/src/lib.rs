//! Domain types shared by every cuadrante crate.
//!
//! - [`date_key`] -- `YYYY-MM-DD` entry keys and calendar month ranges.
//! - [`entry`] -- the per-day [`Entry`] record and partial updates.
//! - [`user`] -- team members and their advisory roles.
//! - [`change_log`] -- immutable audit records of entry mutations.
//! - [`diff`] / [`report`] -- field-level diffs computed at read time.

pub mod change_log;
pub mod date_key;
pub mod diff;
pub mod entry;
pub mod error;
pub mod report;
pub mod types;
pub mod user;

pub use change_log::{ChangeAction, ChangeLogRecord, NewChangeLog, UNKNOWN_ACTOR};
pub use date_key::{DateKey, YearMonth};
pub use entry::{Entry, EntryPatch};
pub use error::CoreError;
pub use user::{NewUser, Role, User};
