//! Advocate directory library.
//!
//! Exposes the listing engine, routes and state for the `advocates` binary
//! and for integration tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod listing;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod theme;

pub use app::build_app;
pub use config::Config;
pub use state::AppState;
