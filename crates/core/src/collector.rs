//! Data-Source Collector capability (§4.1).

use async_trait::async_trait;
use pulsearc_domain::{BusinessMetadata, BusinessUpdate, CollectorError};
use tokio::sync::mpsc;

/// Given a batch of businesses, produce `BusinessUpdate` values tagged by
/// source name.
///
/// `collect` fails the whole batch only for fatal, whole-batch errors;
/// per-business failures are logged by the implementation and simply omitted
/// from the result.
#[async_trait]
pub trait Collector: Send + Sync {
    /// Stable short identifier, used as the `source` field on every
    /// observation this collector produces. Must not change across process
    /// restarts.
    fn name(&self) -> &str;

    /// Collect updates for the given businesses.
    async fn collect(
        &self,
        businesses: &[BusinessMetadata],
    ) -> Result<Vec<BusinessUpdate>, CollectorError>;
}

/// Optional push variant for collectors that can produce updates faster than
/// the Observation Store can persist them (§4.4 streamed variant).
#[async_trait]
pub trait StreamingCollector: Collector {
    /// Stream updates over `tx` as they become available, enabling the
    /// consumer to apply backpressure.
    async fn stream(
        &self,
        businesses: &[BusinessMetadata],
        tx: mpsc::Sender<BusinessUpdate>,
    ) -> Result<(), CollectorError>;
}
