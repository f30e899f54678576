//! The per-day calendar entry and its partial-update DTO.

use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::error::CoreError;

/// Scheduling details for one calendar day.
///
/// A missing record is equivalent to [`Entry::blank`]; whether a day is
/// "populated" is derived from the fields via [`Entry::is_empty`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub date_key: DateKey,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    /// Name of the last user who wrote this entry.
    #[serde(default)]
    pub editor: String,
    /// Opaque blob-store URLs, in insertion order. Duplicates are allowed.
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl Entry {
    /// An entry with every field empty.
    pub fn blank(date_key: DateKey) -> Self {
        Self {
            date_key,
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            editor: String::new(),
            image_urls: Vec::new(),
        }
    }

    /// True when no text field carries content and there are no images.
    ///
    /// `editor` is bookkeeping and does not count as content.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.address.trim().is_empty()
            && self.phone.trim().is_empty()
            && self.image_urls.is_empty()
    }

    /// Replace every field supplied in `patch` and stamp the editor.
    pub fn apply(&mut self, patch: &EntryPatch, editor: &str) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(address) = &patch.address {
            self.address.clone_from(address);
        }
        if let Some(phone) = &patch.phone {
            self.phone.clone_from(phone);
        }
        if let Some(urls) = &patch.image_urls {
            self.image_urls.clone_from(urls);
        }
        self.editor = editor.to_string();
    }
}

/// Partial update for an entry.
///
/// Supplied top-level fields replace the stored ones wholesale (a supplied
/// `imageUrls` replaces the whole list); omitted fields are preserved.
/// `editor` is required on every write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

impl EntryPatch {
    /// A patch carrying every field of `entry`, as the client sends after a
    /// local edit.
    pub fn full(entry: &Entry) -> Self {
        Self {
            name: Some(entry.name.clone()),
            address: Some(entry.address.clone()),
            phone: Some(entry.phone.clone()),
            image_urls: Some(entry.image_urls.clone()),
            editor: Some(entry.editor.clone()),
        }
    }

    /// The trimmed editor name, or a validation error when it is missing.
    pub fn require_editor(&self) -> Result<&str, CoreError> {
        require_editor(self.editor.as_deref())
    }
}

/// Every write must name its actor.
pub fn require_editor(editor: Option<&str>) -> Result<&str, CoreError> {
    match editor.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(CoreError::Validation("editor is required".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    #[test]
    fn apply_preserves_omitted_fields() {
        let mut entry = Entry::blank(key("2025-09-18"));
        entry.apply(
            &EntryPatch {
                name: Some("Ana".into()),
                ..Default::default()
            },
            "Bob",
        );
        entry.apply(
            &EntryPatch {
                phone: Some("555-1234".into()),
                ..Default::default()
            },
            "Bob",
        );

        assert_eq!(entry.name, "Ana");
        assert_eq!(entry.phone, "555-1234");
        assert_eq!(entry.address, "");
        assert_eq!(entry.editor, "Bob");
    }

    #[test]
    fn apply_replaces_image_list_wholesale() {
        let mut entry = Entry::blank(key("2025-09-18"));
        entry.image_urls = vec!["/uploads/a.png".into(), "/uploads/b.png".into()];
        entry.apply(
            &EntryPatch {
                image_urls: Some(vec!["/uploads/b.png".into()]),
                ..Default::default()
            },
            "Eve",
        );
        assert_eq!(entry.image_urls, vec!["/uploads/b.png".to_string()]);
    }

    #[test]
    fn emptiness_is_derived_from_content() {
        let mut entry = Entry::blank(key("2025-09-18"));
        assert!(entry.is_empty());

        entry.editor = "Bob".into();
        assert!(entry.is_empty());

        entry.image_urls.push("/uploads/x.jpg".into());
        assert!(!entry.is_empty());

        entry.image_urls.clear();
        entry.name = "  ".into();
        assert!(entry.is_empty());
    }

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let entry: Entry = serde_json::from_str(r#"{"dateKey":"2025-09-18","name":"Ana"}"#).unwrap();
        assert_eq!(entry.name, "Ana");
        assert!(entry.image_urls.is_empty());
        assert_eq!(entry.editor, "");
    }

    #[test]
    fn editor_is_required() {
        assert!(EntryPatch::default().require_editor().is_err());
        let patch = EntryPatch {
            editor: Some("  ".into()),
            ..Default::default()
        };
        assert!(patch.require_editor().is_err());
        let patch = EntryPatch {
            editor: Some(" Bob ".into()),
            ..Default::default()
        };
        assert_eq!(patch.require_editor().unwrap(), "Bob");
    }
}
