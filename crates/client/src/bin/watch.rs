//! `cuadrante-watch` -- follows the shared calendar from a terminal.
//!
//! Logs in, loads the current month and logs every change that affects it
//! as it arrives over the sync channel.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                 |
//! |------------------------|----------|-------------------------|
//! | `CUADRANTE_URL`        | no       | `http://localhost:3000` |
//! | `CUADRANTE_IDENTIFIER` | yes      | --                      |

use cuadrante_client::{live, CalendarApi, ClientConfig, Refresh, Session};
use cuadrante_core::YearMonth;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Buffered events between the listener and the session.
const EVENT_BUFFER: usize = 256;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cuadrante_client=info,cuadrante_watch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env();
    let Some(identifier) = config.identifier.clone() else {
        tracing::error!("CUADRANTE_IDENTIFIER environment variable is required");
        std::process::exit(1);
    };

    let api = CalendarApi::new(config.api_url());
    let mut session = match Session::login(api, &identifier, YearMonth::current()).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "Login failed");
            std::process::exit(1);
        }
    };
    tracing::info!(
        month = %session.view().month(),
        populated = session.view().populated_days().count(),
        "Watching calendar"
    );

    let cancel = CancellationToken::new();
    let (tx, mut rx) = mpsc::channel(EVENT_BUFFER);
    let listener = tokio::spawn(live::listen(config.ws_url(), tx, cancel.clone()));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
            event = rx.recv() => {
                let Some(event) = event else { break };
                let name = event.name();
                let date_key = event.date_key();
                match session.apply_event(event) {
                    Refresh::Grid => tracing::info!(
                        event = name,
                        date_key = ?date_key,
                        populated = session.view().populated_days().count(),
                        "Month updated"
                    ),
                    Refresh::UserPanel => tracing::info!(event = name, "Users updated"),
                    Refresh::Nothing => tracing::debug!(event = name, "Event outside view"),
                }
            }
        }
    }

    cancel.cancel();
    let _ = listener.await;
}
