//! Collection Worker binary pairing the Yelp collector with the Observation
//! Store (mirrors `cmd/auto-updater/yelp`).

use std::sync::Arc;
use std::time::Duration;

use pulsearc_infra::scheduling::CollectionWorker;
use pulsearc_infra::YelpCollector;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let deps = pulsearc_daemon::bootstrap().await?;
    let collector = Arc::new(YelpCollector::new(
        deps.http.clone(),
        deps.config.yelp_base_api.clone(),
        deps.config.yelp_api_key.clone(),
    ));

    let mut worker = CollectionWorker::new(
        deps.registry.clone(),
        collector,
        deps.store.clone(),
        deps.metrics.clone(),
    );

    let interval = Duration::from_secs(deps.config.collection_interval_minutes * 60);
    worker.start(interval).await?;
    tracing::info!("yelp collection worker running");

    pulsearc_daemon::wait_for_shutdown_signal().await;
    worker.stop().await?;
    Ok(())
}
