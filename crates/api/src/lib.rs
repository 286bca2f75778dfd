//! FitEngine API server library.
//!
//! Exposes the config, state, error handling, router, and routes so the
//! binary entrypoint and integration tests build the same application.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
