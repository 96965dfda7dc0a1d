//! Performance metrics aggregator
//!
//! This module provides the main `PerformanceMetrics` struct which organizes
//! call and fetch timing into a single handle shared across the collection,
//! sync, analysis, and parked-domain workers.
//!
//! ## Design
//! - **Aggregation pattern** - Holds all individual metrics types
//! - **Convenience methods** - Delegates to underlying metrics for common operations
//! - **Thread-safe** - All underlying metrics use atomics/locks appropriately
//!
//! ## Usage
//!
//! ```rust
//! use pulsearc_infra::observability::metrics::PerformanceMetrics;
//! use std::time::Duration;
//!
//! let metrics = PerformanceMetrics::new();
//!
//! // Record API call
//! metrics.record_call().unwrap();
//!
//! // Record fetch timing
//! metrics.record_fetch_time(Duration::from_millis(123)).unwrap();
//! ```

use std::time::Duration;

use super::{CallMetrics, FetchMetrics};
use crate::observability::MetricsResult;

/// Performance metrics for tracking infrastructure operations
///
/// Aggregates all individual metric types and provides convenience methods
/// for common operations.
#[derive(Debug)]
pub struct PerformanceMetrics {
    /// API call metrics (counts, TTFD, timing)
    pub call: CallMetrics,
    /// HTTP fetch metrics (timing, errors, timeouts)
    pub fetch: FetchMetrics,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMetrics {
    /// Create new PerformanceMetrics instance
    ///
    /// All individual metrics are initialized to zero/empty state.
    pub fn new() -> Self {
        Self {
            call: CallMetrics::new(),
            fetch: FetchMetrics::new(),
        }
    }

    // ========================================================================
    // Convenience Methods - Call Metrics
    // ========================================================================

    /// Record an API call
    ///
    /// Updates total call count and start time for rate calculations.
    pub fn record_call(&self) -> MetricsResult<()> {
        self.call.record_call()
    }

    /// Get time to first data (TTFD) in milliseconds
    ///
    /// Returns 0 if no calls have been made yet.
    pub fn ttfd_ms(&self) -> u64 {
        self.call.get_ttfd_ms()
    }

    /// Get calls per minute rate
    ///
    /// Returns 0.0 if no time has elapsed since first call.
    pub fn calls_per_minute(&self) -> f64 {
        self.call.get_calls_per_minute()
    }

    /// Get P50 (median) fetch time in milliseconds
    ///
    /// Returns `Err(MetricsError::EmptyData)` if no fetch times recorded.
    pub fn p50_fetch_time_ms(&self) -> MetricsResult<u64> {
        self.call.get_p50_fetch_time_ms()
    }

    /// Get P95 fetch time in milliseconds
    ///
    /// Returns `Err(MetricsError::EmptyData)` if no fetch times recorded.
    pub fn p95_fetch_time_ms(&self) -> MetricsResult<u64> {
        self.call.get_p95_fetch_time_ms()
    }

    /// Get P99 fetch time in milliseconds
    ///
    /// Returns `Err(MetricsError::EmptyData)` if no fetch times recorded.
    pub fn p99_fetch_time_ms(&self) -> MetricsResult<u64> {
        self.call.get_p99_fetch_time_ms()
    }

    // ========================================================================
    // Convenience Methods - Fetch Metrics
    // ========================================================================

    /// Record fetch timing
    ///
    /// Updates both FetchMetrics and CallMetrics (for percentile calculations).
    pub fn record_fetch_time(&self, duration: Duration) -> MetricsResult<()> {
        self.fetch.record_fetch_time(duration)?;
        self.call.record_fetch_time(duration)?;
        Ok(())
    }

    /// Record fetch error
    pub fn record_fetch_error(&self) -> MetricsResult<()> {
        self.fetch.record_error()
    }

    /// Record fetch timeout
    pub fn record_fetch_timeout(&self) -> MetricsResult<()> {
        self.fetch.record_timeout()
    }

    /// Get average fetch time in milliseconds
    ///
    /// Returns 0.0 if no fetches recorded.
    pub fn avg_fetch_time_ms(&self) -> f64 {
        self.fetch.get_avg_fetch_time_ms()
    }

    /// Get timeout count
    pub fn timeout_count(&self) -> usize {
        self.fetch.get_timeout_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_default() {
        let metrics1 = PerformanceMetrics::new();
        let metrics2 = PerformanceMetrics::default();

        assert_eq!(metrics1.ttfd_ms(), 0);
        assert_eq!(metrics1.avg_fetch_time_ms(), 0.0);
        assert_eq!(metrics2.ttfd_ms(), 0);
    }

    #[test]
    fn test_call_metrics_delegation() {
        let metrics = PerformanceMetrics::new();

        metrics.record_call().unwrap();
        metrics.record_call().unwrap();
        metrics.record_call().unwrap();

        let cpm = metrics.calls_per_minute();
        assert!(cpm > 0.0);
    }

    #[test]
    fn test_fetch_metrics_delegation() {
        let metrics = PerformanceMetrics::new();

        metrics
            .record_fetch_time(Duration::from_millis(100))
            .unwrap();
        metrics
            .record_fetch_time(Duration::from_millis(200))
            .unwrap();
        metrics
            .record_fetch_time(Duration::from_millis(300))
            .unwrap();

        assert_eq!(metrics.avg_fetch_time_ms(), 200.0);
        assert_eq!(metrics.p50_fetch_time_ms().unwrap(), 200);
        assert_eq!(metrics.p95_fetch_time_ms().unwrap(), 300);

        metrics.record_fetch_error().unwrap();
        metrics.record_fetch_timeout().unwrap();
        metrics.record_fetch_timeout().unwrap();

        assert_eq!(metrics.timeout_count(), 2);
    }

    #[test]
    fn test_integrated_workflow() {
        let metrics = PerformanceMetrics::new();

        metrics.record_call().unwrap();
        metrics
            .record_fetch_time(Duration::from_millis(250))
            .unwrap();
        metrics.record_call().unwrap();

        assert_eq!(metrics.avg_fetch_time_ms(), 250.0);
        assert!(metrics.calls_per_minute() > 0.0);
    }
}
