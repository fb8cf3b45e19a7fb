//! Advocate listing: parameter coercion, SQL generation, execution and the
//! view state that drives the browser table.

mod filter;
mod params;
mod query_builder;
mod service;
mod view;

pub use filter::{format_phone, format_phone_number, matches_live, matches_search};
pub use params::{
    DEFAULT_LIMIT, ListingParams, MAX_LIMIT, RawListingQuery, SortKey, SortOrder,
};
pub use query_builder::{ListingQueryBuilder, SEARCH_COLUMNS, TABLE};
pub use service::{ListingPage, ListingService};
pub use view::{FetchTicket, ListingView};
