//! The API endpoints URIs.

/// The dashboard page.
pub const DASHBOARD: &str = "/";
/// The route for (re)loading the transaction records from the seed source.
pub const INITIALIZE: &str = "/initialize";
/// The route for searching transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for the sales totals of a month.
pub const STATISTICS: &str = "/statistics";
/// The route for the price range histogram of a month.
pub const BAR_CHART: &str = "/bar-chart";
/// The route for the category histogram of a month.
pub const PIE_CHART: &str = "/pie-chart";
/// The route for the transactions, totals and histograms of a month in one response.
pub const COMBINED: &str = "/combined";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD);
        assert_endpoint_is_valid_uri(endpoints::INITIALIZE);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::STATISTICS);
        assert_endpoint_is_valid_uri(endpoints::BAR_CHART);
        assert_endpoint_is_valid_uri(endpoints::PIE_CHART);
        assert_endpoint_is_valid_uri(endpoints::COMBINED);
    }
}
