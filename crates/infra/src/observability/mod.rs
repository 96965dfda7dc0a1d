//! Observability infrastructure for metrics and tracing
//!
//! This module provides production-ready metrics collection with:
//! - Thread-safe counters and timing histograms
//! - Percentile calculations (P50/P95/P99)
//! - Poison-safe mutex handling
//!
//! ## Design Principles
//!
//! 1. **Poison Recovery**: All mutex locks use explicit poison recovery
//!    pattern: ```rust let guard = match mutex.lock() { Ok(guard) => guard,
//!    Err(poison_err) => { tracing::warn!("Mutex poisoned, recovering");
//!    poison_err.into_inner() } }; ```
//!
//! 2. **Future-Proof Returns**: All record methods return `MetricsResult<()>`
//!    for future extensibility (cardinality limits, quotas, validation), but
//!    currently always succeed (return `Ok(())`).
//!
//! 3. **Ring Buffers**: VecDeque for O(1) eviction (not Vec with remove(0))
//!
//! 4. **Memory Ordering**: SeqCst for derived metrics (rates, percentiles),
//!    Acquire/Release for independent counters
//!
//! ## Error Handling
//!
//! ```rust
//! use pulsearc_infra::observability::metrics::PerformanceMetrics;
//!
//! let metrics = PerformanceMetrics::new();
//!
//! // Recommended: Handle future errors gracefully
//! if let Err(e) = metrics.record_call() {
//!     tracing::warn!("Failed to record metric: {}", e);
//!     // Continue execution, metric dropped
//! }
//! ```

pub mod metrics;

/// Metrics error type
///
/// All metrics recording methods return `MetricsResult<()>` for consistency,
/// but **currently always succeed** (return `Ok(())`) except when computing a
/// percentile over an empty data set.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Empty data set - cannot calculate aggregate metric
    #[error("Empty data: cannot calculate {metric}")]
    EmptyData {
        /// Metric name that failed (e.g., "P95", "P50", "average")
        metric: &'static str,
    },
}

/// Result type for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;
