//! Per-session projection of the displayed month.
//!
//! [`ClientView`] holds only what one client shows: the selected month,
//! that month's entries, the user list and whether the user panel is open.
//! Every sync event is offered to the view; the view keeps what concerns
//! it and tells the caller what needs redrawing.

use std::collections::BTreeMap;

use cuadrante_core::types::DbId;
use cuadrante_core::{DateKey, Entry, User, YearMonth};
use cuadrante_events::SyncEvent;

use crate::error::ClientError;

/// What the caller should redraw after a change to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Nothing,
    Grid,
    UserPanel,
}

/// Free-text entry fields a user edits in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    Name,
    Address,
    Phone,
}

#[derive(Debug, Clone)]
pub struct ClientView {
    current_user: User,
    month: YearMonth,
    entries: BTreeMap<DateKey, Entry>,
    users: Vec<User>,
    user_panel_open: bool,
}

impl ClientView {
    pub fn new(current_user: User, month: YearMonth) -> Self {
        Self {
            current_user,
            month,
            entries: BTreeMap::new(),
            users: Vec::new(),
            user_panel_open: false,
        }
    }

    // ---- accessors ----

    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn entry(&self, key: DateKey) -> Option<&Entry> {
        self.entries.get(&key)
    }

    /// Cached entries of the selected month, by date.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Whether the cell for `key` shows any content. A day with no record,
    /// or a record whose fields were all cleared, is empty.
    pub fn is_populated(&self, key: DateKey) -> bool {
        self.entries.get(&key).is_some_and(|e| !e.is_empty())
    }

    /// Days of the selected month whose cells show content, in date order.
    pub fn populated_days(&self) -> impl Iterator<Item = DateKey> + '_ {
        self.entries
            .values()
            .filter(|e| !e.is_empty())
            .map(|e| e.date_key)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_user_panel_open(&self) -> bool {
        self.user_panel_open
    }

    // ---- role checks (advisory) ----

    pub fn can_edit(&self) -> bool {
        self.current_user.role.can_edit_entries()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user.role.is_admin()
    }

    pub fn require_editor(&self) -> Result<(), ClientError> {
        if self.can_edit() {
            Ok(())
        } else {
            Err(ClientError::NotPermitted("viewers cannot edit entries"))
        }
    }

    pub fn require_admin(&self) -> Result<(), ClientError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ClientError::NotPermitted("only admins may do this"))
        }
    }

    // ---- month and user list ----

    /// Switch months. The cache is cleared; the caller refetches.
    pub fn select_month(&mut self, month: YearMonth) {
        self.month = month;
        self.entries.clear();
    }

    /// Replace the cache with freshly fetched entries. Entries outside the
    /// selected month are dropped.
    pub fn load_month(&mut self, entries: Vec<Entry>) {
        let month = self.month;
        self.entries = entries
            .into_iter()
            .filter(|e| month.contains(&e.date_key))
            .map(|e| (e.date_key, e))
            .collect();
    }

    pub fn load_users(&mut self, users: Vec<User>) {
        self.users = users;
    }

    pub fn open_user_panel(&mut self) -> Result<(), ClientError> {
        self.require_admin()?;
        self.user_panel_open = true;
        Ok(())
    }

    pub fn close_user_panel(&mut self) {
        self.user_panel_open = false;
    }

    // ---- sync events ----

    /// Merge one event from the sync channel.
    ///
    /// Entry events outside the selected month are discarded. User events
    /// always update the list but only ask for a redraw while the panel is
    /// open.
    pub fn apply(&mut self, event: SyncEvent) -> Refresh {
        match event {
            SyncEvent::EntryUpserted(entry) => {
                if !self.month.contains(&entry.date_key) {
                    return Refresh::Nothing;
                }
                self.entries.insert(entry.date_key, entry);
                Refresh::Grid
            }
            SyncEvent::EntryDeleted(key) => {
                if !self.month.contains(&key) {
                    return Refresh::Nothing;
                }
                self.entries.remove(&key);
                Refresh::Grid
            }
            SyncEvent::UserAdded(user) => {
                self.users.push(user);
                self.user_panel_refresh()
            }
            SyncEvent::UserDeleted(id) => {
                self.remove_user(id);
                self.user_panel_refresh()
            }
        }
    }

    fn remove_user(&mut self, id: DbId) {
        self.users.retain(|u| u.id != id);
    }

    fn user_panel_refresh(&self) -> Refresh {
        if self.user_panel_open {
            Refresh::UserPanel
        } else {
            Refresh::Nothing
        }
    }

    // ---- optimistic local edits ----

    /// Set one text field locally and return the full entry to send.
    pub fn edit_field(
        &mut self,
        key: DateKey,
        field: EditableField,
        value: impl Into<String>,
    ) -> Result<Entry, ClientError> {
        self.edit(key, |entry| {
            let value = value.into();
            match field {
                EditableField::Name => entry.name = value,
                EditableField::Address => entry.address = value,
                EditableField::Phone => entry.phone = value,
            }
        })
    }

    /// Append an uploaded image URL locally.
    pub fn add_image(&mut self, key: DateKey, url: impl Into<String>) -> Result<Entry, ClientError> {
        self.edit(key, |entry| entry.image_urls.push(url.into()))
    }

    /// Remove every occurrence of `url` locally.
    pub fn remove_image(&mut self, key: DateKey, url: &str) -> Result<Entry, ClientError> {
        self.edit(key, |entry| entry.image_urls.retain(|u| u != url))
    }

    fn edit(&mut self, key: DateKey, change: impl FnOnce(&mut Entry)) -> Result<Entry, ClientError> {
        self.require_editor()?;
        if !self.month.contains(&key) {
            return Err(ClientError::NotPermitted("date is outside the displayed month"));
        }
        let editor = self.current_user.name.clone();
        let entry = self
            .entries
            .entry(key)
            .or_insert_with(|| Entry::blank(key));
        change(entry);
        entry.editor = editor;
        Ok(entry.clone())
    }
}
