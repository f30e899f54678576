//! A logged-in user's [`ClientView`] wired to the HTTP API.
//!
//! Local edits are applied to the view first and then sent as a full-entry
//! upsert. A failed write is logged and returned; the optimistic change is
//! not rolled back and is overwritten by the next sync event or refetch.

use cuadrante_core::report::{build_report, ReportItem};
use cuadrante_core::types::DbId;
use cuadrante_core::{DateKey, Entry, EntryPatch, NewUser, User, YearMonth};
use cuadrante_events::SyncEvent;

use crate::api::CalendarApi;
use crate::error::ClientError;
use crate::view::{ClientView, EditableField, Refresh};

#[derive(Debug)]
pub struct Session {
    api: CalendarApi,
    view: ClientView,
}

impl Session {
    /// Look up `identifier`, then load `month` and the user list.
    pub async fn login(
        api: CalendarApi,
        identifier: &str,
        month: YearMonth,
    ) -> Result<Self, ClientError> {
        let user = api.login(identifier.trim()).await?;
        tracing::info!(user = %user.name, role = %user.role.as_str(), "Logged in");

        let mut session = Self {
            api,
            view: ClientView::new(user, month),
        };
        session.reload().await?;
        session.refresh_users().await?;
        Ok(session)
    }

    pub fn view(&self) -> &ClientView {
        &self.view
    }

    pub fn user(&self) -> &User {
        self.view.current_user()
    }

    pub fn api(&self) -> &CalendarApi {
        &self.api
    }

    /// Merge one sync event into the view.
    pub fn apply_event(&mut self, event: SyncEvent) -> Refresh {
        self.view.apply(event)
    }

    // ---- month navigation ----

    pub async fn select_month(&mut self, month: YearMonth) -> Result<(), ClientError> {
        self.view.select_month(month);
        self.reload().await
    }

    /// Refetch the selected month, e.g. after the sync channel reconnects.
    pub async fn reload(&mut self) -> Result<(), ClientError> {
        let month = self.view.month();
        let entries = self.api.list_month(month).await?;
        tracing::debug!(
            year = month.year(),
            month = month.month(),
            count = entries.len(),
            "Loaded month"
        );
        self.view.load_month(entries);
        Ok(())
    }

    // ---- entry edits ----

    pub async fn commit_field(
        &mut self,
        key: DateKey,
        field: EditableField,
        value: impl Into<String>,
    ) -> Result<Entry, ClientError> {
        let entry = self.view.edit_field(key, field, value)?;
        self.save(entry).await
    }

    /// Upload `data` and append the resulting URL to the entry.
    pub async fn add_image(
        &mut self,
        key: DateKey,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<Entry, ClientError> {
        self.view.require_editor()?;
        let url = self.api.upload_image(file_name, data).await.inspect_err(|e| {
            tracing::error!(error = %e, date_key = %key, "Image upload failed");
        })?;
        let entry = self.view.add_image(key, url)?;
        self.save(entry).await
    }

    /// Remove every occurrence of `url` from the entry. The blob itself is
    /// left in place.
    pub async fn remove_image(&mut self, key: DateKey, url: &str) -> Result<Entry, ClientError> {
        let entry = self.view.remove_image(key, url)?;
        self.save(entry).await
    }

    async fn save(&self, entry: Entry) -> Result<Entry, ClientError> {
        let key = entry.date_key;
        self.api
            .upsert_entry(key, &EntryPatch::full(&entry))
            .await
            .inspect_err(|e| tracing::error!(error = %e, date_key = %key, "Saving entry failed"))
    }

    // ---- users (admin) ----

    pub async fn refresh_users(&mut self) -> Result<(), ClientError> {
        let users = self.api.list_users().await?;
        self.view.load_users(users);
        Ok(())
    }

    /// The list itself is updated when the `userAdded` event arrives.
    pub async fn add_user(&self, user: NewUser) -> Result<User, ClientError> {
        self.view.require_admin()?;
        self.api.create_user(&user).await
    }

    pub async fn delete_user(&self, id: DbId) -> Result<(), ClientError> {
        self.view.require_admin()?;
        self.api.delete_user(id).await
    }

    // ---- report (admin) ----

    /// Changes made during the selected month, newest first, with diffs.
    pub async fn report(&self) -> Result<Vec<ReportItem>, ClientError> {
        self.view.require_admin()?;
        let records = self.api.logs(self.view.month()).await?;
        Ok(build_report(records))
    }
}
