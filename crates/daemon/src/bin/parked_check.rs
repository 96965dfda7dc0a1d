//! Parked-Domain Checker binary (mirrors `cmd/parked-check`).

use std::time::Duration;

use pulsearc_infra::scheduling::ParkedDomainWorker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let deps = pulsearc_daemon::bootstrap().await?;

    let mut worker = ParkedDomainWorker::new(
        deps.registry.clone(),
        deps.notifications.clone(),
        deps.http.clone(),
        deps.metrics.clone(),
    );

    let interval = Duration::from_secs(deps.config.check_interval_minutes * 60);
    worker.start(interval).await?;
    tracing::info!("parked-domain checker running");

    pulsearc_daemon::wait_for_shutdown_signal().await;
    worker.stop().await?;
    Ok(())
}
