//! Cross-Source Syncer (§4.5): per business, diff the snapshot rows across
//! sources and emit one notification per distinct disagreement state.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pulsearc_core::{hash, syncer, NotificationClient, ObservationStore, RegistryClient};
use pulsearc_domain::Notification;
use tracing::{error, info, instrument, warn};

use super::error::SchedulerResult;
use super::ticker::Ticker;
use crate::observability::metrics::PerformanceMetrics;

pub struct SyncerWorker {
    ticker: Ticker,
    registry: Arc<dyn RegistryClient>,
    store: Arc<dyn ObservationStore>,
    notifications: Arc<dyn NotificationClient>,
    metrics: Arc<PerformanceMetrics>,
}

impl SyncerWorker {
    pub fn new(
        registry: Arc<dyn RegistryClient>,
        store: Arc<dyn ObservationStore>,
        notifications: Arc<dyn NotificationClient>,
        metrics: Arc<PerformanceMetrics>,
    ) -> Self {
        Self { ticker: Ticker::new("syncer_worker"), registry, store, notifications, metrics }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    #[instrument(skip(self))]
    pub async fn start(&mut self, interval: Duration) -> SchedulerResult<()> {
        let registry = Arc::clone(&self.registry);
        let store = Arc::clone(&self.store);
        let notifications = Arc::clone(&self.notifications);
        let metrics = Arc::clone(&self.metrics);

        self.ticker
            .start(interval, Arc::clone(&self.metrics), move || {
                let registry = Arc::clone(&registry);
                let store = Arc::clone(&store);
                let notifications = Arc::clone(&notifications);
                let metrics = Arc::clone(&metrics);
                async move { run_tick(registry, store, notifications, metrics).await }
            })
            .await
    }

    pub async fn stop(&mut self) -> SchedulerResult<()> {
        self.ticker.stop().await
    }
}

async fn run_tick(
    registry: Arc<dyn RegistryClient>,
    store: Arc<dyn ObservationStore>,
    notifications: Arc<dyn NotificationClient>,
    metrics: Arc<PerformanceMetrics>,
) {
    let businesses = match registry.get_businesses().await {
        Ok(businesses) => businesses,
        Err(e) => {
            error!(error = %e, "failed to fetch businesses, skipping tick");
            let _ = metrics.record_fetch_error();
            return;
        }
    };

    for business in businesses {
        let snapshot = match store.get_snapshot(business.business_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(business_id = %business.business_id, error = %e, "failed to load snapshot, skipping business");
                continue;
            }
        };

        let Some(disagreement) = syncer::detect_disagreement(&snapshot) else {
            continue;
        };

        let notification_hash = match hash::syncer_hash(&disagreement.entries) {
            Ok(hash) => hash,
            Err(e) => {
                warn!(business_id = %business.business_id, error = %e, "failed to hash disagreement, skipping");
                continue;
            }
        };

        let notification = Notification {
            business_id: business.business_id,
            business_name: business.business_name.clone(),
            event_timestamp: Utc::now(),
            notification_text: syncer::notification_text(business.business_id, &disagreement.sources),
            notification_hash,
            metadata: Default::default(),
        };

        if let Err(e) = notifications.create(notification).await {
            warn!(business_id = %business.business_id, error = %e, "failed to create disagreement notification");
        } else {
            info!(business_id = %business.business_id, sources = ?disagreement.sources, "emitted disagreement notification");
        }
    }
}
