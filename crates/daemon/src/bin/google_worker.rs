//! Collection Worker binary pairing the Google Places collector with the
//! Observation Store (mirrors `cmd/auto-updater/google`).

use std::sync::Arc;
use std::time::Duration;

use pulsearc_infra::scheduling::CollectionWorker;
use pulsearc_infra::GoogleCollector;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let deps = pulsearc_daemon::bootstrap().await?;
    let collector = Arc::new(GoogleCollector::new(
        deps.http.clone(),
        deps.config.google_base_api.clone(),
        deps.config.google_api_key.clone(),
    ));

    let mut worker = CollectionWorker::new(
        deps.registry.clone(),
        collector,
        deps.store.clone(),
        deps.metrics.clone(),
    );

    let interval = Duration::from_secs(deps.config.collection_interval_minutes * 60);
    worker.start(interval).await?;
    tracing::info!("google places collection worker running");

    pulsearc_daemon::wait_for_shutdown_signal().await;
    worker.stop().await?;
    Ok(())
}
