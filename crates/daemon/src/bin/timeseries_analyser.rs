//! Time-Series Analyser binary (mirrors `cmd/timeseries-analyser`).

use std::time::Duration;

use pulsearc_infra::scheduling::AnalyserWorker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let deps = pulsearc_daemon::bootstrap().await?;

    let mut worker = AnalyserWorker::new(
        deps.registry.clone(),
        deps.store.clone(),
        deps.notifications.clone(),
        deps.metrics.clone(),
    );

    let interval = Duration::from_secs(deps.config.analysis_interval_minutes * 60);
    worker.start(interval).await?;
    tracing::info!("time-series analyser running");

    pulsearc_daemon::wait_for_shutdown_signal().await;
    worker.stop().await?;
    Ok(())
}
