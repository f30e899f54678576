//! Integration tests for login and the `/users` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json};
use cuadrante_events::SyncEvent;
use serde_json::json;

#[tokio::test]
async fn create_list_and_login() {
    let app = build_test_app();

    let response = post_json(
        app.router.clone(),
        "/api/v1/users",
        json!({"name": "Ana", "identifier": "1234", "role": "editor"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    assert_eq!(created["role"], "editor");

    // Role defaults to viewer.
    let response = post_json(
        app.router.clone(),
        "/api/v1/users",
        json!({"name": "Bob", "identifier": "5678"}),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["role"], "viewer");

    let json = body_json(get(app.router.clone(), "/api/v1/users").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let response = post_json(app.router, "/api/v1/login", json!({"identifier": "1234"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], created);
}

#[tokio::test]
async fn login_with_unknown_identifier_is_404() {
    let app = build_test_app();

    let response = post_json(app.router, "/api/v1/login", json!({"identifier": "nope"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn invalid_user_input_is_rejected() {
    let app = build_test_app();

    let response = post_json(
        app.router.clone(),
        "/api/v1/users",
        json!({"name": "  ", "identifier": "1234"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json(
        app.router,
        "/api/v1/users",
        json!({"name": "Ana", "identifier": "1234", "role": "owner"}),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn duplicate_user_is_conflict() {
    let app = build_test_app();
    let ana = json!({"name": "Ana", "identifier": "1234"});

    post_json(app.router.clone(), "/api/v1/users", ana.clone()).await;
    let response = post_json(app.router, "/api/v1/users", ana).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_user_broadcasts_id() {
    let app = build_test_app();
    let response = post_json(
        app.router.clone(),
        "/api/v1/users",
        json!({"name": "Ana", "identifier": "1234"}),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let mut rx = app.state.event_bus.subscribe();

    let response = delete(app.router.clone(), &format!("/api/v1/users/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(rx.recv().await.unwrap(), SyncEvent::UserDeleted(id));

    let response = delete(app.router, &format!("/api/v1/users/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
