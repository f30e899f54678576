//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`SyncEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.
//! Every subscriber receives every event; deciding whether an event is
//! relevant (e.g. whether an entry lies in the displayed month) is the
//! subscriber's job.

use cuadrante_core::types::DbId;
use cuadrante_core::{DateKey, Entry, User};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// SyncEvent
// ---------------------------------------------------------------------------

/// A committed mutation, broadcast to every connected session.
///
/// Serialized as `{"type": "entryUpserted", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum SyncEvent {
    UserAdded(User),
    UserDeleted(DbId),
    EntryUpserted(Entry),
    EntryDeleted(DateKey),
}

impl SyncEvent {
    /// Wire name of the event, as used in the `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserAdded(_) => "userAdded",
            Self::UserDeleted(_) => "userDeleted",
            Self::EntryUpserted(_) => "entryUpserted",
            Self::EntryDeleted(_) => "entryDeleted",
        }
    }

    /// The affected date, for entry events.
    pub fn date_key(&self) -> Option<DateKey> {
        match self {
            Self::EntryUpserted(entry) => Some(entry.date_key),
            Self::EntryDeleted(key) => Some(*key),
            Self::UserAdded(_) | Self::UserDeleted(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`SyncEvent`].
///
/// # Usage
///
/// ```rust
/// use cuadrante_events::bus::{EventBus, SyncEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(SyncEvent::UserDeleted(7));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<SyncEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers without waiting on any
    /// of them.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: SyncEvent) {
        let event_type = event.name();
        match self.sender.send(event) {
            Ok(receivers) => tracing::debug!(event_type, receivers, "Published sync event"),
            // Only means there are zero receivers.
            Err(_) => tracing::trace!(event_type, "Sync event dropped, no subscribers"),
        }
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.sender.subscribe()
    }

    /// Number of live receivers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use cuadrante_core::Role;

    use super::*;

    fn entry(key: &str) -> Entry {
        let mut e = Entry::blank(DateKey::parse(key).unwrap());
        e.name = "Ana".into();
        e.editor = "Bob".into();
        e
    }

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(SyncEvent::EntryUpserted(entry("2025-09-18")));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received, SyncEvent::EntryUpserted(entry("2025-09-18")));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(SyncEvent::UserDeleted(3));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1, SyncEvent::UserDeleted(3));
        assert_eq!(e2, SyncEvent::UserDeleted(3));
    }

    #[tokio::test]
    async fn events_arrive_in_publish_order() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        let key = DateKey::parse("2025-09-18").unwrap();

        bus.publish(SyncEvent::EntryUpserted(entry("2025-09-18")));
        bus.publish(SyncEvent::EntryDeleted(key));

        assert_eq!(rx.recv().await.unwrap().name(), "entryUpserted");
        assert_eq!(rx.recv().await.unwrap().name(), "entryDeleted");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(SyncEvent::UserDeleted(1));
    }

    #[test]
    fn wire_format_is_adjacently_tagged() {
        let user = User {
            id: 4,
            name: "Ana".into(),
            identifier: "1234".into(),
            role: Role::Editor,
        };
        let json = serde_json::to_value(SyncEvent::UserAdded(user)).unwrap();
        assert_eq!(json["type"], "userAdded");
        assert_eq!(json["payload"]["role"], "editor");

        let json = serde_json::to_value(SyncEvent::EntryDeleted(
            DateKey::parse("2025-10-01").unwrap(),
        ))
        .unwrap();
        assert_eq!(json, serde_json::json!({"type": "entryDeleted", "payload": "2025-10-01"}));

        let parsed: SyncEvent =
            serde_json::from_value(serde_json::json!({"type": "userDeleted", "payload": 9})).unwrap();
        assert_eq!(parsed, SyncEvent::UserDeleted(9));
    }

    #[test]
    fn entry_events_expose_their_date() {
        let key = DateKey::parse("2025-10-01").unwrap();
        assert_eq!(SyncEvent::EntryDeleted(key).date_key(), Some(key));
        assert_eq!(SyncEvent::UserDeleted(1).date_key(), None);
    }
}
