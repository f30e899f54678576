//! Bus-to-WebSocket fan-out.
//!
//! [`SyncRelay`] subscribes to the [`EventBus`](cuadrante_events::EventBus)
//! and forwards every event to every connection as one JSON text frame.
//! No filtering happens here; each client decides whether an event touches
//! the month it displays.

use std::sync::Arc;

use axum::extract::ws::Message;
use cuadrante_events::SyncEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

pub struct SyncRelay {
    ws_manager: Arc<WsManager>,
}

impl SyncRelay {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run until the bus is closed (every sender dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<SyncEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.relay(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Sync relay lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, sync relay shutting down");
                    break;
                }
            }
        }
    }

    async fn relay(&self, event: &SyncEvent) {
        let text = match serde_json::to_string(event) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, event_type = event.name(), "Failed to encode sync event");
                return;
            }
        };
        let delivered = self.ws_manager.broadcast(Message::Text(text.into())).await;
        tracing::debug!(event_type = event.name(), delivered, "Relayed sync event");
    }
}
