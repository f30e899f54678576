//! Unit tests for `WsManager` and the bus relay.
//!
//! These exercise the connection manager directly, without performing any
//! HTTP upgrades.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::Message;
use cuadrante_api::ws::{SyncRelay, WsManager};
use cuadrante_core::{DateKey, Entry};
use cuadrante_events::{EventBus, SyncEvent};

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();
    assert_eq!(manager.connection_count().await, 0);

    let _rx = manager.add("conn-1".to_string()).await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("nonexistent").await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 0);
}

#[tokio::test]
async fn broadcast_reaches_every_live_connection() {
    let manager = WsManager::new();
    let mut rx1 = manager.add("conn-1".to_string()).await;
    let mut rx2 = manager.add("conn-2".to_string()).await;
    let rx3 = manager.add("conn-3".to_string()).await;
    drop(rx3);

    let delivered = manager.broadcast(Message::Text("hello".into())).await;
    assert_eq!(delivered, 2);

    assert_eq!(rx1.recv().await.unwrap(), Message::Text("hello".into()));
    assert_eq!(rx2.recv().await.unwrap(), Message::Text("hello".into()));
}

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();
    let mut rx1 = manager.add("conn-1".to_string()).await;
    let mut rx2 = manager.add("conn-2".to_string()).await;

    manager.shutdown_all().await;

    assert_eq!(manager.connection_count().await, 0);
    assert!(matches!(rx1.recv().await, Some(Message::Close(None))));
    assert!(matches!(rx2.recv().await, Some(Message::Close(None))));
}

#[tokio::test]
async fn ping_all_sends_ping_frames() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn-1".to_string()).await;

    manager.ping_all().await;

    assert!(matches!(rx.recv().await, Some(Message::Ping(_))));
}

#[tokio::test]
async fn relay_forwards_bus_events_as_json_text() {
    let manager = Arc::new(WsManager::new());
    let mut rx = manager.add("conn-1".to_string()).await;
    let bus = EventBus::default();
    let relay = tokio::spawn(SyncRelay::new(Arc::clone(&manager)).run(bus.subscribe()));

    let mut entry = Entry::blank(DateKey::parse("2025-10-01").unwrap());
    entry.name = "Ana".into();
    bus.publish(SyncEvent::EntryUpserted(entry));

    let msg = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("relay should forward within 2s")
        .unwrap();
    let Message::Text(text) = msg else {
        panic!("expected a text frame, got {msg:?}");
    };
    let json: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
    assert_eq!(json["type"], "entryUpserted");
    assert_eq!(json["payload"]["dateKey"], "2025-10-01");
    assert_eq!(json["payload"]["name"], "Ana");

    // Dropping the bus closes the channel and ends the relay.
    drop(bus);
    tokio::time::timeout(Duration::from_secs(2), relay)
        .await
        .expect("relay should stop once the bus is gone")
        .unwrap();
}
