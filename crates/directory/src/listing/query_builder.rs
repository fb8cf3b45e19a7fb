//! Listing query builder using SeaQuery.
//!
//! Produces the page query and the count query for a [`ListingParams`].
//! Both share [`ListingQueryBuilder::condition`], so a total can never be
//! computed against a different predicate than the page it accompanies.

use sea_query::extension::postgres::PgExpr;
use sea_query::{
    Alias, Asterisk, Cond, Condition, Expr, Order, PostgresQueryBuilder, Query, SelectStatement,
};

use super::params::{ListingParams, SortOrder};
use crate::models::advocate::COLUMNS;

/// Table holding advocate rows.
pub const TABLE: &str = "advocates";

/// Text columns searched by `q`.
pub const SEARCH_COLUMNS: [&str; 4] = ["first_name", "last_name", "city", "degree"];

/// Query builder for the advocate listing.
pub struct ListingQueryBuilder<'a> {
    params: &'a ListingParams,
}

impl<'a> ListingQueryBuilder<'a> {
    pub fn new(params: &'a ListingParams) -> Self {
        Self { params }
    }

    /// Build the page SELECT with ordering and LIMIT/OFFSET.
    pub fn build(&self) -> String {
        let mut query = Query::select();

        for column in COLUMNS {
            query.column((Alias::new(TABLE), Alias::new(column)));
        }
        query.from(Alias::new(TABLE));
        self.add_filter(&mut query);
        self.add_sorts(&mut query);

        query.limit(self.params.limit.max(0) as u64);
        query.offset(self.params.offset.max(0) as u64);

        query.to_string(PostgresQueryBuilder)
    }

    /// Build the COUNT(*) query over the same predicate, ignoring pagination.
    pub fn build_count(&self) -> String {
        let mut query = Query::select();

        query.expr(Expr::col(Asterisk).count());
        query.from(Alias::new(TABLE));
        self.add_filter(&mut query);

        query.to_string(PostgresQueryBuilder)
    }

    /// The WHERE predicate: `q` as a case-insensitive substring of any
    /// search column. `None` when there is no search text.
    pub fn condition(&self) -> Option<Condition> {
        let q = self.params.q.as_deref()?;
        let pattern = format!("%{}%", escape_like_wildcards(q));

        let mut cond = Cond::any();
        for column in SEARCH_COLUMNS {
            cond = cond.add(
                Expr::col((Alias::new(TABLE), Alias::new(column))).ilike(pattern.clone()),
            );
        }
        Some(cond)
    }

    fn add_filter(&self, query: &mut SelectStatement) {
        if let Some(cond) = self.condition() {
            query.cond_where(cond);
        }
    }

    /// Primary key column in byte order, then `id` so equal values page stably.
    fn add_sorts(&self, query: &mut SelectStatement) {
        let order = match self.params.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let column = self.params.sort.column();
        query.order_by_expr(
            Expr::cust(format!(r#""{TABLE}"."{column}" COLLATE "C""#)),
            order,
        );
        query.order_by((Alias::new(TABLE), Alias::new("id")), Order::Asc);
    }
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
