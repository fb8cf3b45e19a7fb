//! HTTP route handlers.

pub mod advocates;
pub mod front;
pub mod health;
pub mod helpers;
pub mod metrics;

use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

/// All application routes, without middleware layers.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(front::router())
        .merge(advocates::router())
        .merge(health::router())
        .merge(metrics::router())
        .fallback(not_found)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
