//! Prometheus metrics collection.

use prometheus_client::encoding::{EncodeLabelSet, text::encode};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::histogram::{Histogram, exponential_buckets};
use prometheus_client::registry::Registry;

/// HTTP request labels.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct HttpLabels {
    pub method: String,
    pub path: String,
    pub status: u16,
}

/// Application metrics.
pub struct Metrics {
    registry: Registry,

    /// HTTP request counter by method/path/status.
    pub http_requests: Family<HttpLabels, Counter>,

    /// HTTP request duration histogram.
    pub http_duration_seconds: Family<HttpLabels, Histogram>,

    /// Duration of the page + count listing transaction.
    pub listing_query_duration_seconds: Histogram,

    /// Listing requests that carried a non-empty `q`.
    pub listing_searches: Counter,
}

impl Metrics {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let http_requests = Family::<HttpLabels, Counter>::default();
        registry.register(
            "http_requests",
            "Total HTTP requests",
            http_requests.clone(),
        );

        let http_duration_seconds = Family::<HttpLabels, Histogram>::new_with_constructor(|| {
            Histogram::new(exponential_buckets(0.001, 2.0, 12))
        });
        registry.register(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
            http_duration_seconds.clone(),
        );

        let listing_query_duration_seconds =
            Histogram::new(exponential_buckets(0.0001, 2.0, 14));
        registry.register(
            "listing_query_duration_seconds",
            "Advocate listing query duration in seconds",
            listing_query_duration_seconds.clone(),
        );

        let listing_searches = Counter::default();
        registry.register(
            "listing_searches",
            "Listing requests with search text",
            listing_searches.clone(),
        );

        Self {
            registry,
            http_requests,
            http_duration_seconds,
            listing_query_duration_seconds,
            listing_searches,
        }
    }

    /// Record an HTTP request.
    pub fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let labels = HttpLabels {
            method: method.to_string(),
            path: normalize_path(path),
            status,
        };

        self.http_requests.get_or_create(&labels).inc();
        self.http_duration_seconds
            .get_or_create(&labels)
            .observe(duration_secs);
    }

    /// Record a listing fetch.
    pub fn record_listing(&self, searched: bool, duration_secs: f64) {
        self.listing_query_duration_seconds.observe(duration_secs);
        if searched {
            self.listing_searches.inc();
        }
    }

    /// Encode metrics in Prometheus text format.
    pub fn encode(&self) -> String {
        let mut buffer = String::new();
        // Prometheus encoding to String buffer is infallible
        #[allow(clippy::expect_used)]
        encode(&mut buffer, &self.registry).expect("encoding metrics");
        buffer
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish()
    }
}

/// Collapse unknown paths so label cardinality stays bounded.
fn normalize_path(path: &str) -> String {
    match path {
        "/" | "/api/advocates" | "/health" | "/metrics" => path.to_string(),
        _ => "other".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_are_kept() {
        assert_eq!(normalize_path("/api/advocates"), "/api/advocates");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/wp-admin/setup.php"), "other");
    }

    #[test]
    fn encode_includes_recorded_series() {
        let metrics = Metrics::new();
        metrics.record_request("GET", "/api/advocates", 200, 0.01);
        metrics.record_listing(true, 0.002);

        let output = metrics.encode();
        assert!(output.contains("http_requests_total"));
        assert!(output.contains("path=\"/api/advocates\""));
        assert!(output.contains("listing_searches_total 1"));
        assert!(output.contains("listing_query_duration_seconds"));
    }
}
