//! Shared route helpers.

use std::time::Instant;

use axum::extract::Query;
use axum::extract::rejection::QueryRejection;

use crate::error::AppResult;
use crate::listing::{ListingPage, ListingParams, RawListingQuery};
use crate::state::AppState;

/// Coerce the listing query string. A query string that cannot be decoded
/// at all is treated as empty rather than rejected.
pub fn listing_params(query: Result<Query<RawListingQuery>, QueryRejection>) -> ListingParams {
    match query {
        Ok(Query(raw)) => ListingParams::from_raw(&raw),
        Err(e) => {
            tracing::debug!(error = %e, "undecodable listing query; using defaults");
            ListingParams::default()
        }
    }
}

/// Run the listing fetch and record its duration.
pub async fn fetch_page(state: &AppState, params: &ListingParams) -> AppResult<ListingPage> {
    let started = Instant::now();
    let page = state.listing().list(params).await?;
    state
        .metrics()
        .record_listing(params.q.is_some(), started.elapsed().as_secs_f64());
    Ok(page)
}

/// HTML-escape a string for safe output.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escape_special_chars() {
        assert_eq!(
            html_escape(r#"<a href="x">O'Neil & co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;O&#x27;Neil &amp; co&lt;/a&gt;"
        );
    }

    #[test]
    fn decoded_query_is_coerced() {
        let raw = RawListingQuery {
            limit: Some("-5".to_string()),
            offset: Some("-10".to_string()),
            ..Default::default()
        };
        let params = listing_params(Ok(Query(raw)));
        assert_eq!(params.limit, 50);
        assert_eq!(params.offset, 0);
    }
}
