//! Field-level comparison of two entry snapshots.
//!
//! Used when rendering the change report; nothing here is ever persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entry::Entry;

/// The status of a field in a diff comparison.
///
/// - `Added`     -- present only in the new snapshot.
/// - `Removed`   -- present only in the previous snapshot.
/// - `Changed`   -- present in both with different values.
///
/// Fields equal on both sides are left out of a diff entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Changed,
}

impl DiffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed => "changed",
        }
    }
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user-visible fields of an [`Entry`], in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Name,
    Address,
    Phone,
    Editor,
    ImageUrls,
}

impl EntryField {
    pub const ALL: [EntryField; 5] = [
        Self::Name,
        Self::Address,
        Self::Phone,
        Self::Editor,
        Self::ImageUrls,
    ];

    /// Wire name of the field, matching the JSON representation of [`Entry`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::Editor => "editor",
            Self::ImageUrls => "imageUrls",
        }
    }

    fn value(&self, entry: &Entry) -> Value {
        match self {
            Self::Name => Value::from(entry.name.as_str()),
            Self::Address => Value::from(entry.address.as_str()),
            Self::Phone => Value::from(entry.phone.as_str()),
            Self::Editor => Value::from(entry.editor.as_str()),
            Self::ImageUrls => Value::from(entry.image_urls.clone()),
        }
    }

    fn is_blank(&self, entry: &Entry) -> bool {
        match self {
            Self::Name => entry.name.is_empty(),
            Self::Address => entry.address.is_empty(),
            Self::Phone => entry.phone.is_empty(),
            Self::Editor => entry.editor.is_empty(),
            Self::ImageUrls => entry.image_urls.is_empty(),
        }
    }
}

/// One field's difference between two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub field: &'static str,
    pub status: DiffStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
}

impl FieldChange {
    /// e.g. `phone: "" -> "555-1234"`.
    pub fn describe(&self) -> String {
        let show = |v: &Option<Value>| v.as_ref().map_or_else(|| "-".to_string(), Value::to_string);
        format!("{}: {} -> {}", self.field, show(&self.before), show(&self.after))
    }
}

/// Compare two snapshots field by field.
///
/// Blank fields on a missing side are skipped, so a create only lists the
/// fields it populated and a delete only the fields it cleared. Unchanged
/// fields are omitted.
pub fn diff_entries(previous: Option<&Entry>, next: Option<&Entry>) -> Vec<FieldChange> {
    EntryField::ALL
        .iter()
        .filter_map(|field| match (previous, next) {
            (None, Some(new)) if !field.is_blank(new) => Some(FieldChange {
                field: field.as_str(),
                status: DiffStatus::Added,
                before: None,
                after: Some(field.value(new)),
            }),
            (Some(old), None) if !field.is_blank(old) => Some(FieldChange {
                field: field.as_str(),
                status: DiffStatus::Removed,
                before: Some(field.value(old)),
                after: None,
            }),
            (Some(old), Some(new)) => {
                let (before, after) = (field.value(old), field.value(new));
                (before != after).then(|| FieldChange {
                    field: field.as_str(),
                    status: DiffStatus::Changed,
                    before: Some(before),
                    after: Some(after),
                })
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_key::DateKey;

    fn entry() -> Entry {
        Entry::blank(DateKey::parse("2025-09-18").unwrap())
    }

    #[test]
    fn as_str_returns_correct_strings() {
        assert_eq!(DiffStatus::Added.as_str(), "added");
        assert_eq!(DiffStatus::Removed.as_str(), "removed");
        assert_eq!(DiffStatus::Changed.as_str(), "changed");
    }

    #[test]
    fn update_lists_only_changed_fields() {
        let mut old = entry();
        old.name = "Ana".into();
        old.editor = "Bob".into();
        let mut new = old.clone();
        new.phone = "555-1234".into();

        let changes = diff_entries(Some(&old), Some(&new));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "phone");
        assert_eq!(changes[0].status, DiffStatus::Changed);
        assert_eq!(changes[0].describe(), r#"phone: "" -> "555-1234""#);
    }

    #[test]
    fn identical_snapshots_have_no_changes() {
        let mut e = entry();
        e.name = "Ana".into();
        assert!(diff_entries(Some(&e), Some(&e)).is_empty());
    }

    #[test]
    fn create_lists_populated_fields() {
        let mut new = entry();
        new.name = "Ana".into();
        new.editor = "Bob".into();

        let fields: Vec<_> = diff_entries(None, Some(&new))
            .into_iter()
            .map(|c| (c.field, c.status))
            .collect();
        assert_eq!(
            fields,
            vec![("name", DiffStatus::Added), ("editor", DiffStatus::Added)]
        );
    }

    #[test]
    fn delete_lists_cleared_fields() {
        let mut old = entry();
        old.image_urls = vec!["/uploads/a.png".into()];

        let changes = diff_entries(Some(&old), None);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "imageUrls");
        assert_eq!(changes[0].status, DiffStatus::Removed);
        assert_eq!(changes[0].before, Some(serde_json::json!(["/uploads/a.png"])));
    }
}
