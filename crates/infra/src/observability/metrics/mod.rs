//! Metrics collection modules
//!
//! Thread-safe metrics for various subsystems.

/// Default ring buffer capacity for percentile-tracking metrics.
pub(crate) const DEFAULT_RING_BUFFER_CAPACITY: usize = 1_000;

pub mod call;
pub mod fetch;
pub mod performance;

// Re-export metric types for convenience
pub use call::CallMetrics;
pub use fetch::FetchMetrics;
pub use performance::PerformanceMetrics;
