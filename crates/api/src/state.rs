use std::sync::Arc;

use cuadrante_db::Store;
use cuadrante_events::EventBus;

use crate::blob::BlobStore;
use crate::config::ServerConfig;
use crate::engine::{CalendarEngine, UserEngine};
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Entry, change log and user persistence.
    pub store: Arc<dyn Store>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Broadcast hub for committed mutations.
    pub event_bus: Arc<EventBus>,
    /// Storage for uploaded images.
    pub blobs: Arc<dyn BlobStore>,
}

impl AppState {
    pub fn calendar(&self) -> CalendarEngine {
        CalendarEngine::new(Arc::clone(&self.store), Arc::clone(&self.event_bus))
    }

    pub fn users(&self) -> UserEngine {
        UserEngine::new(Arc::clone(&self.store), Arc::clone(&self.event_bus))
    }
}
