//! WebSocket listener for the sync channel.
//!
//! Connects to `/api/v1/ws`, decodes every text frame into a [`SyncEvent`]
//! and forwards it over an mpsc channel. Reconnects with a fixed delay
//! when the connection drops. Events missed while disconnected are not
//! replayed; callers refetch the month after a reconnect if they care.

use std::time::Duration;

use cuadrante_events::SyncEvent;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

/// Delay between reconnection attempts.
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Why a single connection ended.
enum SessionEnd {
    Disconnected,
    ReceiverGone,
    Cancelled,
}

/// Run the listener until `cancel` fires or `events` is dropped.
pub async fn listen(ws_url: String, events: mpsc::Sender<SyncEvent>, cancel: CancellationToken) {
    loop {
        tracing::info!(url = %ws_url, "Connecting to sync channel");

        let connected = tokio::select! {
            _ = cancel.cancelled() => return,
            result = connect_async(ws_url.as_str()) => result,
        };

        match connected {
            Ok((ws_stream, _response)) => {
                tracing::info!("Sync channel connected");
                match run_session(ws_stream, &events, &cancel).await {
                    SessionEnd::Cancelled => return,
                    SessionEnd::ReceiverGone => {
                        tracing::debug!("Event receiver dropped, stopping listener");
                        return;
                    }
                    SessionEnd::Disconnected => {
                        tracing::warn!("Sync channel closed, reconnecting");
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Sync channel connection failed");
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(RECONNECT_DELAY) => {}
        }
    }
}

async fn run_session(
    ws_stream: tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    events: &mpsc::Sender<SyncEvent>,
    cancel: &CancellationToken,
) -> SessionEnd {
    // The channel is push-only; pings are answered by tungstenite.
    let (_sink, mut stream) = ws_stream.split();

    loop {
        let msg = tokio::select! {
            _ = cancel.cancelled() => return SessionEnd::Cancelled,
            msg = stream.next() => msg,
        };

        match msg {
            Some(Ok(Message::Text(text))) => {
                let Some(event) = decode(&text) else {
                    continue;
                };
                if events.send(event).await.is_err() {
                    return SessionEnd::ReceiverGone;
                }
            }
            Some(Ok(Message::Close(frame))) => {
                tracing::info!(?frame, "Server closed sync channel");
                return SessionEnd::Disconnected;
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                tracing::error!(error = %e, "Sync channel receive error");
                return SessionEnd::Disconnected;
            }
            None => return SessionEnd::Disconnected,
        }
    }
}

/// Parse one text frame. Unknown or malformed frames are logged and skipped.
fn decode(text: &str) -> Option<SyncEvent> {
    match serde_json::from_str(text) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!(error = %e, raw = %text, "Malformed sync event");
            None
        }
    }
}
