#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use cuadrante_api::blob::LocalBlobStore;
use cuadrante_api::config::{DefaultAdmin, ServerConfig};
use cuadrante_api::router::build_app_router;
use cuadrante_api::state::AppState;
use cuadrante_api::ws::{SyncRelay, WsManager};
use cuadrante_client::ClientConfig;
use cuadrante_db::MemoryStore;
use cuadrante_events::EventBus;

/// A server bound to an ephemeral local port.
pub struct TestServer {
    pub state: AppState,
    pub client_config: ClientConfig,
}

impl TestServer {
    /// Start the full router with the sync relay and a seeded admin
    /// (`admin` / `admin`).
    pub async fn start() -> Self {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["http://localhost:5173".to_string()],
            request_timeout_secs: 30,
            database_url: None,
            upload_dir: std::env::temp_dir()
                .join(format!("cuadrante-client-uploads-{}", uuid::Uuid::new_v4())),
            default_admin: DefaultAdmin {
                name: "admin".to_string(),
                identifier: "admin".to_string(),
            },
        };
        let state = AppState {
            store: Arc::new(MemoryStore::new()),
            config: Arc::new(config.clone()),
            ws_manager: Arc::new(WsManager::new()),
            event_bus: Arc::new(EventBus::default()),
            blobs: Arc::new(LocalBlobStore::new(&config.upload_dir)),
        };
        state
            .users()
            .seed_default_admin(&config.default_admin)
            .await
            .unwrap();

        tokio::spawn(SyncRelay::new(Arc::clone(&state.ws_manager)).run(state.event_bus.subscribe()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = build_app_router(state.clone(), &config);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            client_config: ClientConfig::new(format!("http://{addr}"), None),
        }
    }

    /// Wait until `count` sync channel connections are registered.
    pub async fn wait_for_connections(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.state.ws_manager.connection_count().await < count {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await
        .expect("sync channel connections should register");
    }
}
