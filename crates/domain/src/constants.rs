//! Domain-level constants shared by collectors, workers, and infra clients.

/// Default per-worker tick period when `COLLECTION_INTERVAL_MINUTES` is unset.
pub const DEFAULT_COLLECTION_INTERVAL_MINUTES: u64 = 15;

/// Default tick period for the Parked-Domain Checker.
pub const DEFAULT_CHECK_INTERVAL_MINUTES: u64 = 60;

/// Default tick period for the Time-Series Analyser.
pub const DEFAULT_ANALYSIS_INTERVAL_MINUTES: u64 = 30;

/// Suggested bound on every outbound HTTP call (§5 Timeouts).
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Number of most-recent time-series points the Analyser compares per source.
pub const ANALYSER_WINDOW_SIZE: i64 = 5;

/// Source identifier emitted by the web scraper collector.
pub const SOURCE_WEB_SCRAPER: &str = "web-scraper";

/// Source identifier emitted by the Yelp collector.
pub const SOURCE_YELP: &str = "yelp-api-connector";

/// Source identifier emitted by the Google Places collector.
pub const SOURCE_GOOGLE: &str = "google-api-connector";

/// Source tag attached to parked-domain notifications.
pub const SOURCE_PARKED_DOMAIN_CHECKER: &str = "parked-domain-checker";

/// Godaddy parked-page signature substrings (lowercase body match, §4.7).
pub const GODADDY_PARKED_SIGNATURES: [&str; 2] = [
    "this web page is parked free, courtesy of godaddy",
    "our domain broker service may be able to get it for you",
];
