//! Collection Worker / Auto-Updater (§4.4): pairs one Collector with the
//! Observation Store on a fixed period.

use std::sync::Arc;
use std::time::Duration;

use pulsearc_core::{Collector, ObservationStore, RegistryClient};
use tracing::{error, info, instrument, warn};

use super::error::SchedulerResult;
use super::ticker::Ticker;
use crate::observability::metrics::PerformanceMetrics;

pub struct CollectionWorker {
    ticker: Ticker,
    registry: Arc<dyn RegistryClient>,
    collector: Arc<dyn Collector>,
    store: Arc<dyn ObservationStore>,
    metrics: Arc<PerformanceMetrics>,
}

impl CollectionWorker {
    pub fn new(
        registry: Arc<dyn RegistryClient>,
        collector: Arc<dyn Collector>,
        store: Arc<dyn ObservationStore>,
        metrics: Arc<PerformanceMetrics>,
    ) -> Self {
        Self { ticker: Ticker::new("collection_worker"), registry, collector, store, metrics }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    #[instrument(skip(self))]
    pub async fn start(&mut self, interval: Duration) -> SchedulerResult<()> {
        let registry = Arc::clone(&self.registry);
        let collector = Arc::clone(&self.collector);
        let store = Arc::clone(&self.store);
        let metrics = Arc::clone(&self.metrics);
        let source = collector.name().to_string();

        self.ticker
            .start(interval, Arc::clone(&self.metrics), move || {
                let registry = Arc::clone(&registry);
                let collector = Arc::clone(&collector);
                let store = Arc::clone(&store);
                let metrics = Arc::clone(&metrics);
                let source = source.clone();
                async move { run_tick(registry, collector, store, metrics, &source).await }
            })
            .await
    }

    pub async fn stop(&mut self) -> SchedulerResult<()> {
        self.ticker.stop().await
    }
}

async fn run_tick(
    registry: Arc<dyn RegistryClient>,
    collector: Arc<dyn Collector>,
    store: Arc<dyn ObservationStore>,
    metrics: Arc<PerformanceMetrics>,
    source: &str,
) {
    let businesses = match registry.get_businesses().await {
        Ok(businesses) => businesses,
        Err(e) => {
            error!(%source, error = %e, "failed to fetch businesses, skipping tick");
            let _ = metrics.record_fetch_error();
            return;
        }
    };

    let updates = match collector.collect(&businesses).await {
        Ok(updates) => updates,
        Err(e) => {
            error!(%source, error = %e, "collector failed, skipping tick");
            let _ = metrics.record_fetch_error();
            return;
        }
    };

    info!(%source, count = updates.len(), "collected updates");

    for update in updates {
        let business_id = update.metadata.business_id;
        if let Err(e) = store.upsert(update).await {
            warn!(%source, %business_id, error = %e, "failed to persist update, continuing");
        }
    }
}
