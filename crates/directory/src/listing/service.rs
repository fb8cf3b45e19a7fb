//! Listing service: runs the page and count queries.

use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::PgPool;
use tracing::debug;

use super::params::ListingParams;
use super::query_builder::ListingQueryBuilder;
use crate::models::{Advocate, AdvocateRow};

/// One page of matching advocates plus the total number of matches.
#[derive(Debug, Clone, Serialize)]
pub struct ListingPage {
    pub records: Vec<Advocate>,
    /// Matches across the whole table, independent of limit/offset.
    pub total: i64,
    pub params: ListingParams,
}

/// Service for the advocate listing.
#[derive(Clone)]
pub struct ListingService {
    pool: PgPool,
}

impl ListingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a page and its total.
    ///
    /// Both statements run in one read-only REPEATABLE READ transaction so
    /// they observe the same snapshot.
    pub async fn list(&self, params: &ListingParams) -> Result<ListingPage> {
        let builder = ListingQueryBuilder::new(params);
        let page_sql = builder.build();
        let count_sql = builder.build_count();

        debug!(sql = %page_sql, "listing query");

        let mut tx = self
            .pool
            .begin()
            .await
            .context("failed to begin listing transaction")?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .context("failed to set listing transaction mode")?;

        let rows = sqlx::query_as::<_, AdvocateRow>(&page_sql)
            .fetch_all(&mut *tx)
            .await
            .context("failed to fetch advocate page")?;

        let total: i64 = sqlx::query_scalar(&count_sql)
            .fetch_one(&mut *tx)
            .await
            .context("failed to count matching advocates")?;

        tx.commit()
            .await
            .context("failed to finish listing transaction")?;

        debug!(rows = rows.len(), total, "listing fetched");

        Ok(ListingPage {
            records: rows.into_iter().map(Advocate::from).collect(),
            total,
            params: params.clone(),
        })
    }
}
