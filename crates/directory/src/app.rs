//! Router assembly shared by the binary and integration tests.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::Config;
use crate::routes;
use crate::routes::advocates::TOTAL_COUNT_HEADER;
use crate::state::AppState;

/// Build the full application: routes plus middleware.
pub fn build_app(state: AppState, config: &Config) -> Router {
    let cors = build_cors_layer(&config.cors_allowed_origins);

    // Last added = first executed: TraceLayer → CORS → metrics → routes
    routes::router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::track_metrics,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Read-only CORS policy. `X-Total-Count` is exposed so browser clients on
/// other origins can read the total.
pub fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::HEAD, Method::OPTIONS];
    let total_header = HeaderName::from_static(TOTAL_COUNT_HEADER);

    if allowed_origins.len() == 1 && allowed_origins[0] == "*" {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any)
            .expose_headers([total_header])
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any)
            .expose_headers([total_header])
    }
}
