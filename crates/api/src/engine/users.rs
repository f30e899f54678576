//! Team member management and identifier login.

use std::sync::Arc;

use cuadrante_core::types::DbId;
use cuadrante_core::{CoreError, NewUser, Role, User};
use cuadrante_db::Store;
use cuadrante_events::{EventBus, SyncEvent};

use crate::config::DefaultAdmin;
use crate::error::{AppError, AppResult};

pub struct UserEngine {
    store: Arc<dyn Store>,
    bus: Arc<EventBus>,
}

impl UserEngine {
    pub fn new(store: Arc<dyn Store>, bus: Arc<EventBus>) -> Self {
        Self { store, bus }
    }

    /// Resolve a login identifier to its user. The identifier is the only
    /// credential.
    pub async fn login(&self, identifier: &str) -> AppResult<User> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(CoreError::Validation("identifier is required".into()).into());
        }
        let user = self
            .store
            .find_user_by_identifier(identifier)
            .await?
            .ok_or_else(|| AppError::not_found("User", identifier))?;

        tracing::info!(user_id = user.id, user = %user.name, role = %user.role, "User logged in");
        Ok(user)
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.store.list_users().await?)
    }

    pub async fn create(&self, input: NewUser) -> AppResult<User> {
        let input = input.normalized()?;
        let user = self.store.create_user(&input).await?;

        tracing::info!(user_id = user.id, user = %user.name, role = %user.role, "User created");
        self.bus.publish(SyncEvent::UserAdded(user.clone()));
        Ok(user)
    }

    pub async fn delete(&self, id: DbId) -> AppResult<User> {
        let user = self
            .store
            .delete_user(id)
            .await?
            .ok_or_else(|| AppError::not_found("User", id))?;

        tracing::info!(user_id = id, user = %user.name, "User deleted");
        self.bus.publish(SyncEvent::UserDeleted(id));
        Ok(user)
    }

    /// Create the configured admin when no users exist yet.
    ///
    /// Returns the seeded user, or `None` if the store already had users.
    pub async fn seed_default_admin(&self, admin: &DefaultAdmin) -> AppResult<Option<User>> {
        if self.store.count_users().await? > 0 {
            return Ok(None);
        }
        let input = NewUser {
            name: admin.name.clone(),
            identifier: admin.identifier.clone(),
            role: Role::Admin,
        }
        .normalized()?;
        let user = self.store.create_user(&input).await?;
        tracing::warn!(
            user = %user.name,
            "User store was empty, seeded default admin"
        );
        Ok(Some(user))
    }
}
