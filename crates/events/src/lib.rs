//! Cuadrante synchronization bus.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`SyncEvent`] -- the four mutation events every connected session
//!   receives.

pub mod bus;

pub use bus::{EventBus, SyncEvent};
