//! Advocate listing API.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use super::helpers::{fetch_page, listing_params};
use crate::error::AppResult;
use crate::listing::RawListingQuery;
use crate::models::Advocate;
use crate::state::AppState;

/// Response header carrying the number of matches across all pages.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Create the advocates API router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/advocates", get(list_advocates))
}

/// Listing response body. The total travels in [`TOTAL_COUNT_HEADER`].
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub data: Vec<Advocate>,
}

/// `GET /api/advocates?q=&limit=&offset=&sort=&order=`
async fn list_advocates(
    State(state): State<AppState>,
    query: Result<Query<RawListingQuery>, QueryRejection>,
) -> AppResult<Response> {
    let params = listing_params(query);
    let page = fetch_page(&state, &params).await?;

    tracing::debug!(
        q = params.query_text(),
        limit = params.limit,
        offset = params.offset,
        total = page.total,
        "advocates listed"
    );

    let mut response = Json(ListResponse { data: page.records }).into_response();
    response
        .headers_mut()
        .insert(
            HeaderName::from_static(TOTAL_COUNT_HEADER),
            HeaderValue::from(page.total),
        );

    Ok(response)
}
