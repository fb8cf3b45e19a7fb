//! Listing request parameters.
//!
//! Query-string values arrive as raw optional strings and are coerced here.
//! Nothing in this module can fail: malformed values fall back to defaults.

use serde::{Deserialize, Serialize};

/// Page size used when `limit` is absent or unusable.
pub const DEFAULT_LIMIT: i64 = 50;

/// Upper bound on page size.
pub const MAX_LIMIT: i64 = 200;

/// Raw query string as received. Every field is a string so that malformed
/// numbers reach the coercion step instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListingQuery {
    pub q: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

/// Sortable columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    FirstName,
    #[default]
    LastName,
    City,
}

impl SortKey {
    /// Parse a sort key; unknown values fall back to last name.
    ///
    /// Matching ignores case, `-` and `_`, so `first-name`, `firstName`
    /// and `first_name` are equivalent.
    pub fn parse(value: &str) -> Self {
        let key: String = value
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match key.trim() {
            "firstname" => Self::FirstName,
            "city" => Self::City,
            _ => Self::LastName,
        }
    }

    /// Column backing this key.
    pub fn column(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::City => "city",
        }
    }

    /// Canonical query-string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first-name",
            Self::LastName => "last-name",
            Self::City => "city",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` (any case) is descending; everything else is ascending.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Normalized listing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingParams {
    /// Trimmed search text; `None` matches every row.
    pub q: Option<String>,
    pub limit: i64,
    pub offset: i64,
    pub sort: SortKey,
    pub order: SortOrder,
}

impl Default for ListingParams {
    fn default() -> Self {
        Self {
            q: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
            sort: SortKey::default(),
            order: SortOrder::default(),
        }
    }
}

impl ListingParams {
    /// Coerce a raw query into usable parameters.
    pub fn from_raw(raw: &RawListingQuery) -> Self {
        Self {
            q: normalize_query(raw.q.as_deref()),
            limit: coerce_limit(raw.limit.as_deref()),
            offset: coerce_offset(raw.offset.as_deref()),
            sort: raw.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
            order: raw.order.as_deref().map(SortOrder::parse).unwrap_or_default(),
        }
    }

    /// Search text, or the empty string.
    pub fn query_text(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }

    /// Encode as a query string (without the leading `?`).
    ///
    /// Defaults are omitted except `sort`/`order`, which are always present
    /// so links are explicit about ordering.
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(q) = &self.q {
            parts.push(format!("q={}", urlencoding::encode(q)));
        }
        if self.limit != DEFAULT_LIMIT {
            parts.push(format!("limit={}", self.limit));
        }
        if self.offset != 0 {
            parts.push(format!("offset={}", self.offset));
        }
        parts.push(format!("sort={}", self.sort.as_str()));
        parts.push(format!("order={}", self.order.as_str()));
        parts.join("&")
    }
}

fn normalize_query(q: Option<&str>) -> Option<String> {
    q.map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
}

fn coerce_limit(value: Option<&str>) -> i64 {
    match value.and_then(|v| v.trim().parse::<i64>().ok()) {
        Some(limit) if limit > 0 => limit.min(MAX_LIMIT),
        _ => DEFAULT_LIMIT,
    }
}

fn coerce_offset(value: Option<&str>) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(0)
        .max(0)
}
