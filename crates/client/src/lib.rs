//! Client side of the shared calendar.
//!
//! - [`view`] -- per-session projection of one month, applying sync events.
//! - [`api`] -- typed HTTP client for the `/api/v1` endpoints.
//! - [`live`] -- WebSocket listener feeding sync events into a channel.
//! - [`session`] -- a logged-in user's view wired to the API.

pub mod api;
pub mod config;
pub mod error;
pub mod live;
pub mod session;
pub mod view;

pub use api::CalendarApi;
pub use config::ClientConfig;
pub use error::ClientError;
pub use session::Session;
pub use view::{ClientView, EditableField, Refresh};
