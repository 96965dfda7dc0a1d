//! Collection Worker binary pairing the Web Scraper collector with the
//! Observation Store (mirrors `cmd/auto-updater/scraper`).

use std::sync::Arc;
use std::time::Duration;

use pulsearc_infra::scheduling::CollectionWorker;
use pulsearc_infra::WebScraperCollector;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let deps = pulsearc_daemon::bootstrap().await?;
    let collector = Arc::new(WebScraperCollector::new(deps.http.clone(), deps.phone_validator.clone()));

    let mut worker = CollectionWorker::new(
        deps.registry.clone(),
        collector,
        deps.store.clone(),
        deps.metrics.clone(),
    );

    let interval = Duration::from_secs(deps.config.collection_interval_minutes * 60);
    worker.start(interval).await?;
    tracing::info!("web scraper collection worker running");

    pulsearc_daemon::wait_for_shutdown_signal().await;
    worker.stop().await?;
    Ok(())
}
