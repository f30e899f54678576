mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use common::TestServer;
use cuadrante_client::{live, CalendarApi, ClientError, EditableField, Refresh, Session};
use cuadrante_core::{DateKey, EntryPatch, NewUser, Role, YearMonth};
use cuadrante_events::SyncEvent;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

fn key(s: &str) -> DateKey {
    DateKey::parse(s).unwrap()
}

fn month(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

async fn next_event(rx: &mut mpsc::Receiver<SyncEvent>) -> SyncEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("event should arrive")
        .expect("listener should still be running")
}

async fn add_editor(server: &TestServer, name: &str, identifier: &str) {
    let api = CalendarApi::new(server.client_config.api_url());
    let admin = Session::login(api, "admin", YearMonth::current()).await.unwrap();
    admin
        .add_user(NewUser {
            name: name.into(),
            identifier: identifier.into(),
            role: Role::Editor,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn unknown_identifier_is_not_found() {
    let server = TestServer::start().await;
    let api = CalendarApi::new(server.client_config.api_url());

    let result = Session::login(api, "nope", month(2025, 9)).await;
    assert_matches!(result, Err(ClientError::NotFound(_)));
}

#[tokio::test]
async fn sessions_only_merge_events_for_their_month() {
    let server = TestServer::start().await;
    add_editor(&server, "Ana", "1234").await;

    let api = CalendarApi::new(server.client_config.api_url());
    let mut september = Session::login(api.clone(), "1234", month(2025, 9)).await.unwrap();
    let mut october = Session::login(api.clone(), "admin", month(2025, 10)).await.unwrap();

    let cancel = CancellationToken::new();
    let (tx_a, mut rx_a) = mpsc::channel(16);
    let (tx_b, mut rx_b) = mpsc::channel(16);
    tokio::spawn(live::listen(server.client_config.ws_url(), tx_a, cancel.clone()));
    tokio::spawn(live::listen(server.client_config.ws_url(), tx_b, cancel.clone()));
    server.wait_for_connections(2).await;

    let saved = september
        .commit_field(key("2025-09-18"), EditableField::Name, "Ana")
        .await
        .unwrap();
    assert_eq!(saved.editor, "Ana");

    let patch = EntryPatch {
        name: Some("Eve".into()),
        editor: Some("admin".into()),
        ..Default::default()
    };
    api.upsert_entry(key("2025-10-01"), &patch).await.unwrap();

    // Client A (September)
    let event = next_event(&mut rx_a).await;
    assert_eq!(september.apply_event(event), Refresh::Grid);
    let event = next_event(&mut rx_a).await;
    assert_eq!(september.apply_event(event), Refresh::Nothing);
    assert!(september.view().entry(key("2025-10-01")).is_none());

    // Client B (October)
    let event = next_event(&mut rx_b).await;
    assert_eq!(october.apply_event(event), Refresh::Nothing);
    let event = next_event(&mut rx_b).await;
    assert_eq!(october.apply_event(event), Refresh::Grid);
    assert_eq!(october.view().entry(key("2025-10-01")).unwrap().name, "Eve");
    assert!(october.view().is_populated(key("2025-10-01")));

    cancel.cancel();
}

#[tokio::test]
async fn image_edits_round_trip_through_the_server() {
    let server = TestServer::start().await;
    add_editor(&server, "Ana", "1234").await;
    let api = CalendarApi::new(server.client_config.api_url());
    let mut session = Session::login(api.clone(), "1234", month(2025, 9)).await.unwrap();

    let entry = session
        .add_image(key("2025-09-18"), "front.png", b"png bytes".to_vec())
        .await
        .unwrap();
    assert_eq!(entry.image_urls.len(), 1);
    let url = entry.image_urls[0].clone();
    assert!(url.starts_with("/uploads/image-"));
    assert!(url.ends_with(".png"));

    let entry = session.remove_image(key("2025-09-18"), &url).await.unwrap();
    assert!(entry.image_urls.is_empty());
    assert!(api.get_entry(key("2025-09-18")).await.unwrap().image_urls.is_empty());
}

#[tokio::test]
async fn viewers_and_editors_are_limited_client_side() {
    let server = TestServer::start().await;
    let api = CalendarApi::new(server.client_config.api_url());
    let admin = Session::login(api.clone(), "admin", month(2025, 9)).await.unwrap();
    admin
        .add_user(NewUser {
            name: "Val".into(),
            identifier: "5678".into(),
            role: Role::Viewer,
        })
        .await
        .unwrap();

    let mut viewer = Session::login(api, "5678", month(2025, 9)).await.unwrap();
    assert_matches!(
        viewer
            .commit_field(key("2025-09-18"), EditableField::Phone, "555")
            .await,
        Err(ClientError::NotPermitted(_))
    );
    assert_matches!(viewer.report().await, Err(ClientError::NotPermitted(_)));
    assert_matches!(viewer.delete_user(1).await, Err(ClientError::NotPermitted(_)));
}

#[tokio::test]
async fn admin_report_describes_changes_made_this_month() {
    let server = TestServer::start().await;
    let api = CalendarApi::new(server.client_config.api_url());
    let mut admin = Session::login(api, "admin", YearMonth::current()).await.unwrap();

    let today = YearMonth::current().first_key();
    admin
        .commit_field(today, EditableField::Phone, "555-1234")
        .await
        .unwrap();
    admin
        .commit_field(today, EditableField::Phone, "555-9999")
        .await
        .unwrap();

    let report = admin.report().await.unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].summary, format!("Updated entry for {today}"));
    assert_eq!(report[0].changes[0].describe(), r#"phone: "555-1234" -> "555-9999""#);
    assert_eq!(report[1].summary, format!("Created entry for {today}"));
}
