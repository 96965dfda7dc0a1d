//! Time-Series Analyser (§4.6): per (business, source), compares the most
//! recent time-series points and emits a notification on the first change.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pulsearc_core::{analyser, hash, NotificationClient, ObservationStore, RegistryClient};
use pulsearc_domain::constants::ANALYSER_WINDOW_SIZE;
use pulsearc_domain::Notification;
use serde_json::json;
use tracing::{error, info, instrument, warn};

use super::error::SchedulerResult;
use super::ticker::Ticker;
use crate::observability::metrics::PerformanceMetrics;

pub struct AnalyserWorker {
    ticker: Ticker,
    registry: Arc<dyn RegistryClient>,
    store: Arc<dyn ObservationStore>,
    notifications: Arc<dyn NotificationClient>,
    metrics: Arc<PerformanceMetrics>,
}

impl AnalyserWorker {
    pub fn new(
        registry: Arc<dyn RegistryClient>,
        store: Arc<dyn ObservationStore>,
        notifications: Arc<dyn NotificationClient>,
        metrics: Arc<PerformanceMetrics>,
    ) -> Self {
        Self { ticker: Ticker::new("analyser_worker"), registry, store, notifications, metrics }
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
        let by_source =
            match store.get_timeseries_count(business.business_id, ANALYSER_WINDOW_SIZE).await {
                Ok(points) => points,
                Err(e) => {
                    warn!(business_id = %business.business_id, error = %e, "failed to load timeseries, skipping business");
                    continue;
                }
            };

        for (source, points) in by_source {
            let Some(changed_fields) = analyser::detect_transition(&points) else {
                continue;
            };

            let date = Utc::now().date_naive();
            let notification = Notification {
                business_id: business.business_id,
                business_name: business.business_name.clone(),
                event_timestamp: Utc::now(),
                notification_text: analyser::notification_text(
                    business.business_id,
                    &source,
                    &changed_fields,
                ),
                notification_hash: hash::analyser_hash(business.business_id, &source, date),
                metadata: [("source".to_string(), json!(source))].into_iter().collect(),
            };

            if let Err(e) = notifications.create(notification).await {
                warn!(business_id = %business.business_id, %source, error = %e, "failed to create transition notification");
            } else {
                info!(business_id = %business.business_id, %source, fields = ?changed_fields, "emitted transition notification");
            }
        }
    }
}
