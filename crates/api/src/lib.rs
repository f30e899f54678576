//! Cuadrante API server library.
//!
//! Exposes the building blocks (config, state, mutation engine, error
//! handling, routes, WebSocket relay) so integration tests and the binary
//! entrypoint can both access them.

pub mod blob;
pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
