//! Stormscout command service library.
//!
//! Exposes configuration, state, error handling, routes, the alert engine
//! and background jobs so integration tests and the binary entrypoint can
//! both access them.

pub mod background;
pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notifications;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
