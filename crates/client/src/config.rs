/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin, without the `/api/v1` suffix.
    pub base_url: String,
    /// Login identifier used by the watcher binary.
    pub identifier: Option<String>,
}

impl ClientConfig {
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `CUADRANTE_URL`        | `http://localhost:3000` |
    /// | `CUADRANTE_IDENTIFIER` | unset                   |
    pub fn from_env() -> Self {
        let base_url = std::env::var("CUADRANTE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into());
        let identifier = std::env::var("CUADRANTE_IDENTIFIER")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self::new(base_url, identifier)
    }

    pub fn new(base_url: impl Into<String>, identifier: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            identifier,
        }
    }

    /// Base URL of the versioned HTTP API.
    pub fn api_url(&self) -> String {
        format!("{}/api/v1", self.base_url)
    }

    /// WebSocket URL of the sync channel (`http` becomes `ws`, `https`
    /// becomes `wss`).
    pub fn ws_url(&self) -> String {
        let origin = match self.base_url.split_once("://") {
            Some(("https", rest)) => format!("wss://{rest}"),
            Some((_, rest)) => format!("ws://{rest}"),
            None => format!("ws://{}", self.base_url),
        };
        format!("{origin}/api/v1/ws")
    }
}
