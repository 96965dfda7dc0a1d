//! Parked-Domain Checker (§4.7): fetches each business's site directly and
//! emits a notification when a parked-domain signature matches.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pulsearc_core::{hash, parked, NotificationClient, RegistryClient};
use pulsearc_domain::constants::SOURCE_PARKED_DOMAIN_CHECKER;
use pulsearc_domain::Notification;
use reqwest::Method;
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};

use super::error::SchedulerResult;
use super::ticker::Ticker;
use crate::http::HttpClient;
use crate::observability::metrics::PerformanceMetrics;

pub struct ParkedDomainWorker {
    ticker: Ticker,
    registry: Arc<dyn RegistryClient>,
    notifications: Arc<dyn NotificationClient>,
    http: HttpClient,
    metrics: Arc<PerformanceMetrics>,
}

impl ParkedDomainWorker {
    pub fn new(
        registry: Arc<dyn RegistryClient>,
        notifications: Arc<dyn NotificationClient>,
        http: HttpClient,
        metrics: Arc<PerformanceMetrics>,
    ) -> Self {
        Self { ticker: Ticker::new("parked_domain_worker"), registry, notifications, http, metrics }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    #[instrument(skip(self))]
    pub async fn start(&mut self, interval: Duration) -> SchedulerResult<()> {
        let registry = Arc::clone(&self.registry);
        let notifications = Arc::clone(&self.notifications);
        let http = self.http.clone();
        let metrics = Arc::clone(&self.metrics);

        self.ticker
            .start(interval, Arc::clone(&self.metrics), move || {
                let registry = Arc::clone(&registry);
                let notifications = Arc::clone(&notifications);
                let http = http.clone();
                let metrics = Arc::clone(&metrics);
                async move { run_tick(registry, notifications, http, metrics).await }
            })
            .await
    }

    pub async fn stop(&mut self) -> SchedulerResult<()> {
        self.ticker.stop().await
    }
}

async fn run_tick(
    registry: Arc<dyn RegistryClient>,
    notifications: Arc<dyn NotificationClient>,
    http: HttpClient,
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
        let response = http.send(http.request(Method::GET, &business.business_uri)).await;

        let body = match response {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(business_id = %business.business_id, error = %e, "failed to read response body, skipping");
                    continue;
                }
            },
            Ok(resp) => {
                debug!(business_id = %business.business_id, status = %resp.status(), "non-200, not reported as parked");
                continue;
            }
            Err(e) => {
                debug!(business_id = %business.business_id, error = %e, "transport error, not reported as parked");
                continue;
            }
        };

        if !parked::is_parked(&body) {
            continue;
        }

        let date = Utc::now().date_naive();
        let notification = Notification {
            business_id: business.business_id,
            business_name: business.business_name.clone(),
            event_timestamp: Utc::now(),
            notification_text: parked::notification_text(business.business_id, &business.business_uri),
            notification_hash: hash::parked_domain_hash(business.business_id, date),
            metadata: [("source".to_string(), json!(SOURCE_PARKED_DOMAIN_CHECKER))]
                .into_iter()
                .collect(),
        };

        if let Err(e) = notifications.create(notification).await {
            warn!(business_id = %business.business_id, error = %e, "failed to create parked-domain notification");
        } else {
            info!(business_id = %business.business_id, "emitted parked-domain notification");
        }
    }
}
