#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Each [`TestApp`] runs the real router and state against its own Postgres
//! schema, so tests can insert rows and assert exact totals without seeing
//! each other's data. Tests are skipped when `DATABASE_URL` is not set.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use advocate_directory::theme::ThemeEngine;
use advocate_directory::{AppState, Config, build_app, db};
use advocate_directory_test_utils::IsolatedSchema;

/// Test application wrapper using the REAL routes and state.
pub struct TestApp {
    router: Router,
    pub db: PgPool,
    pub state: AppState,
    schema: IsolatedSchema,
}

impl TestApp {
    /// Build an app on a fresh schema, or `None` when no database is
    /// configured.
    pub async fn try_new() -> Option<Self> {
        dotenvy::dotenv().ok();

        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping database test");
            return None;
        };

        let schema = IsolatedSchema::create(&database_url).await;
        db::run_migrations(&schema.pool)
            .await
            .expect("failed to run migrations");

        // Tests run from crates/directory/, templates live at the project root
        let templates_dir =
            std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates");
        let theme = ThemeEngine::new(&templates_dir).expect("failed to load templates");

        let config = Config {
            port: 0,
            database_url,
            database_max_connections: 4,
            cors_allowed_origins: vec!["*".to_string()],
            templates_dir,
            run_migrations: false,
        };

        let state = AppState::from_parts(schema.pool.clone(), theme);
        let router = build_app(state.clone(), &config);

        Some(Self {
            router,
            db: schema.pool.clone(),
            state,
            schema,
        })
    }

    /// Send a request through the router.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// GET a path.
    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Drop this app's schema.
    pub async fn cleanup(self) {
        self.schema.drop_schema().await;
    }
}

/// Read a response body as a string.
pub async fn response_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read a response body as JSON.
pub async fn response_json(response: Response) -> Value {
    let text = response_text(response).await;
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("invalid JSON ({e}): {text}"))
}

/// The `X-Total-Count` header as a number.
pub fn total_count(response: &Response) -> i64 {
    response
        .headers()
        .get("x-total-count")
        .expect("missing X-Total-Count header")
        .to_str()
        .unwrap()
        .parse()
        .unwrap()
}
