//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::db;
use crate::listing::ListingService;
use crate::metrics::Metrics;
use crate::theme::ThemeEngine;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool.
    db: PgPool,

    /// Advocate listing service.
    listing: ListingService,

    /// Theme engine for template rendering.
    theme: ThemeEngine,

    /// Prometheus metrics.
    metrics: Metrics,
}

impl AppState {
    /// Create new application state with database connections.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = db::create_pool(config)
            .await
            .context("failed to create database pool")?;

        if config.run_migrations {
            db::run_migrations(&db)
                .await
                .context("failed to run migrations")?;
            info!("Migrations applied");
        }

        let theme = ThemeEngine::new(&config.templates_dir)
            .context("failed to load templates")?;

        Ok(Self::from_parts(db, theme))
    }

    /// Assemble state from an existing pool and theme.
    pub fn from_parts(db: PgPool, theme: ThemeEngine) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                listing: ListingService::new(db.clone()),
                db,
                theme,
                metrics: Metrics::new(),
            }),
        }
    }

    /// Get the listing service.
    pub fn listing(&self) -> &ListingService {
        &self.inner.listing
    }

    /// Get the theme engine.
    pub fn theme(&self) -> &ThemeEngine {
        &self.inner.theme
    }

    /// Get the metrics registry.
    pub fn metrics(&self) -> &Metrics {
        &self.inner.metrics
    }

    /// Check if PostgreSQL is healthy.
    pub async fn postgres_healthy(&self) -> bool {
        db::check_health(&self.inner.db).await
    }
}
