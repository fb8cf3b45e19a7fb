//! Listing view state.
//!
//! Holds the loaded page and the editable search text. Filter state that
//! survives navigation lives in the URL: [`ListingView::submit`] and the
//! link helpers produce the next [`ListingParams`], and the server fetch is
//! what changes `records`. Local filtering via
//! [`ListingView::visible_records`] never performs I/O.

use super::filter::matches_live;
use super::params::{ListingParams, SortKey, SortOrder};
use super::service::ListingPage;
use crate::models::Advocate;

/// Handle for an issued fetch. Responses are applied only if their ticket
/// is newer than the last applied one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    pub params: ListingParams,
}

/// Client-side listing state.
#[derive(Debug, Clone, Default)]
pub struct ListingView {
    records: Vec<Advocate>,
    total: i64,
    params: ListingParams,
    search_text: String,
    issued: u64,
    applied: u64,
}

impl ListingView {
    /// Empty view with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// View seeded from a page fetched for a URL, with the search box
    /// showing that page's `q`.
    pub fn from_page(page: ListingPage) -> Self {
        let mut view = Self::new();
        view.search_text = page.params.query_text().to_string();
        let ticket = view.fetch(page.params.clone());
        view.apply(&ticket, page);
        view
    }

    /// Ticket for the first load using the current parameters.
    pub fn initial_fetch(&mut self) -> FetchTicket {
        self.fetch(self.params.clone())
    }

    /// Update the search box. Does not fetch.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Clear the search box; every loaded record becomes visible again.
    pub fn reset(&mut self) {
        self.search_text.clear();
    }

    /// Submit the search box: same sort/order/limit, offset back to 0.
    pub fn submit(&mut self) -> FetchTicket {
        let trimmed = self.search_text.trim();
        let params = ListingParams {
            q: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            offset: 0,
            ..self.params.clone()
        };
        self.fetch(params)
    }

    /// Fetch another page of the current result set.
    pub fn go_to(&mut self, offset: i64) -> FetchTicket {
        let params = ListingParams {
            offset: offset.max(0),
            ..self.params.clone()
        };
        self.fetch(params)
    }

    /// Fetch sorted by `key`; re-selecting the active key flips the order.
    pub fn sort_by(&mut self, key: SortKey) -> FetchTicket {
        let params = self.sorted_params(key);
        self.fetch(params)
    }

    /// Apply a fetched page. Returns `false` and leaves state untouched when
    /// the response belongs to a fetch older than one already applied.
    pub fn apply(&mut self, ticket: &FetchTicket, page: ListingPage) -> bool {
        if ticket.seq <= self.applied {
            return false;
        }
        self.applied = ticket.seq;
        self.records = page.records;
        self.total = page.total;
        self.params = page.params;
        true
    }

    fn fetch(&mut self, params: ListingParams) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            seq: self.issued,
            params,
        }
    }

    fn sorted_params(&self, key: SortKey) -> ListingParams {
        let order = if key == self.params.sort {
            self.params.order.reversed()
        } else {
            SortOrder::Asc
        };
        ListingParams {
            sort: key,
            order,
            offset: 0,
            ..self.params.clone()
        }
    }

    /// Every record of the loaded page.
    pub fn records(&self) -> &[Advocate] {
        &self.records
    }

    /// Loaded records matching the search box.
    pub fn visible_records(&self) -> Vec<&Advocate> {
        self.records
            .iter()
            .filter(|a| matches_live(a, &self.search_text))
            .collect()
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn params(&self) -> &ListingParams {
        &self.params
    }

    /// 1-based page number of the loaded page.
    pub fn page_number(&self) -> i64 {
        self.params.offset / self.params.limit.max(1) + 1
    }

    pub fn page_count(&self) -> i64 {
        let limit = self.params.limit.max(1);
        ((self.total + limit - 1) / limit).max(1)
    }

    pub fn prev_offset(&self) -> Option<i64> {
        (self.params.offset > 0).then(|| (self.params.offset - self.params.limit).max(0))
    }

    /// Start of the following page, if any. Offsets past `i64::MAX` have
    /// no next page.
    pub fn next_offset(&self) -> Option<i64> {
        self.params
            .offset
            .checked_add(self.params.limit)
            .filter(|next| *next < self.total)
    }

    /// Link to the page starting at `offset`.
    pub fn page_url(&self, offset: i64) -> String {
        let params = ListingParams {
            offset: offset.max(0),
            ..self.params.clone()
        };
        format!("/?{}", params.to_query_string())
    }

    /// Link for a column header.
    pub fn sort_url(&self, key: SortKey) -> String {
        format!("/?{}", self.sorted_params(key).to_query_string())
    }

    /// Link that drops the search while keeping ordering and page size.
    pub fn reset_url(&self) -> String {
        let params = ListingParams {
            q: None,
            offset: 0,
            ..self.params.clone()
        };
        format!("/?{}", params.to_query_string())
    }
}
