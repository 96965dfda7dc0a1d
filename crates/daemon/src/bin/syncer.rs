//! Cross-Source Syncer binary (mirrors `cmd/syncer`).

use std::time::Duration;

use pulsearc_infra::scheduling::SyncerWorker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let deps = pulsearc_daemon::bootstrap().await?;

    let mut worker = SyncerWorker::new(
        deps.registry.clone(),
        deps.store.clone(),
        deps.notifications.clone(),
        deps.metrics.clone(),
    );

    let interval = Duration::from_secs(deps.config.collection_interval_minutes * 60);
    worker.start(interval).await?;
    tracing::info!("cross-source syncer running");

    pulsearc_daemon::wait_for_shutdown_signal().await;
    worker.stop().await?;
    Ok(())
}
