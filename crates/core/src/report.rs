//! Monthly change report: stored log records annotated with read-time diffs.

use serde::Serialize;

use crate::change_log::{ChangeAction, ChangeLogRecord};
use crate::diff::{diff_entries, FieldChange};

/// A change log record plus its derived summary and field changes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportItem {
    #[serde(flatten)]
    pub record: ChangeLogRecord,
    pub summary: String,
    pub changes: Vec<FieldChange>,
}

impl ReportItem {
    pub fn from_record(record: ChangeLogRecord) -> Self {
        let summary = match record.action {
            ChangeAction::Create => format!("Created entry for {}", record.entry_date_key),
            ChangeAction::Update => format!("Updated entry for {}", record.entry_date_key),
            ChangeAction::Delete => format!("Deleted entry for {}", record.entry_date_key),
        };
        let changes = diff_entries(record.previous_data.as_ref(), record.new_data.as_ref());
        Self {
            record,
            summary,
            changes,
        }
    }

    /// Multi-line plain text rendering, one line per changed field.
    pub fn to_text(&self) -> String {
        let mut text = format!(
            "{} - {} - {}: {}",
            self.record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.record.user,
            self.record.action,
            self.summary
        );
        for change in &self.changes {
            text.push_str("\n  - ");
            text.push_str(&change.describe());
        }
        text
    }
}

/// Annotate records, preserving their order.
pub fn build_report(records: Vec<ChangeLogRecord>) -> Vec<ReportItem> {
    records.into_iter().map(ReportItem::from_record).collect()
}
