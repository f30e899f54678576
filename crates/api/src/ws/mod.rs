//! WebSocket sync channel.
//!
//! Provides connection management, heartbeat pings, the relay that fans
//! bus events out to every connection, and the HTTP upgrade handler.

mod handler;
mod heartbeat;
pub mod manager;
pub mod relay;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
pub use relay::SyncRelay;
