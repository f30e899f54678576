#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cuadrante_api::blob::LocalBlobStore;
use cuadrante_api::config::{DefaultAdmin, ServerConfig};
use cuadrante_api::router::build_app_router;
use cuadrante_api::state::AppState;
use cuadrante_api::ws::WsManager;
use cuadrante_db::MemoryStore;
use cuadrante_events::EventBus;

/// Build a test `ServerConfig` with safe defaults and a unique upload dir.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        upload_dir: std::env::temp_dir().join(format!("cuadrante-uploads-{}", uuid::Uuid::new_v4())),
        default_admin: DefaultAdmin {
            name: "admin".to_string(),
            identifier: "admin".to_string(),
        },
    }
}

/// Application state over the given in-memory store.
pub fn test_state(config: &ServerConfig, store: MemoryStore) -> AppState {
    AppState {
        store: Arc::new(store),
        config: Arc::new(config.clone()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus: Arc::new(EventBus::default()),
        blobs: Arc::new(LocalBlobStore::new(&config.upload_dir)),
    }
}

/// A test app plus handles to its state, for tests that inspect the bus.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub upload_dir: PathBuf,
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app() -> TestApp {
    build_test_app_with_store(MemoryStore::new())
}

pub fn build_test_app_with_store(store: MemoryStore) -> TestApp {
    let config = test_config();
    let state = test_state(&config, store);
    TestApp {
        router: build_app_router(state.clone(), &config),
        state,
        upload_dir: config.upload_dir,
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}
