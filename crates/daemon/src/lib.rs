//! Shared process bootstrap for the pipeline's worker binaries.
//!
//! Each binary in `src/bin/` wires one worker (a Collection Worker for one
//! collector, the Syncer, the Analyser, or the Parked-Domain Checker) and
//! runs it until it receives a termination signal. The dependency wiring
//! (config, pool, HTTP clients, metrics) is identical across binaries and
//! lives here.

use std::sync::Arc;

use anyhow::Context;
use pulsearc_infra::config::AppConfig;
use pulsearc_infra::database::PostgresObservationStore;
use pulsearc_infra::http::HttpClient;
use pulsearc_infra::observability::metrics::PerformanceMetrics;
use pulsearc_infra::{build_pool, HttpNotificationClient, HttpPhoneValidator, HttpRegistryClient};
use tracing_subscriber::EnvFilter;

/// Dependencies shared by every worker binary.
pub struct WorkerDeps {
    pub config: AppConfig,
    pub http: HttpClient,
    pub registry: Arc<HttpRegistryClient>,
    pub notifications: Arc<HttpNotificationClient>,
    pub phone_validator: Arc<HttpPhoneValidator>,
    pub store: Arc<PostgresObservationStore>,
    pub metrics: Arc<PerformanceMetrics>,
}

/// Install a `tracing` subscriber reading `RUST_LOG`, falling back to the
/// worker's configured `LOG_LEVEL`.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load configuration, install tracing, and construct every shared adapter.
pub async fn bootstrap() -> anyhow::Result<WorkerDeps> {
    dotenvy::dotenv().ok();
    let config = pulsearc_infra::load().context("failed to load configuration")?;
    init_tracing(&config.log_level);

    let http = HttpClient::builder()
        .timeout(std::time::Duration::from_secs(
            pulsearc_domain::constants::DEFAULT_HTTP_TIMEOUT_SECS,
        ))
        .build()
        .context("failed to build http client")?;

    let registry = Arc::new(HttpRegistryClient::new(http.clone(), config.registry_base_url()));
    let notifications =
        Arc::new(HttpNotificationClient::new(http.clone(), config.notifications_base_url()));
    let phone_validator =
        Arc::new(HttpPhoneValidator::new(http.clone(), config.phone_validator_base_url()));

    let pool = build_pool(&config.postgres_url).context("failed to build postgres pool")?;
    let store = Arc::new(PostgresObservationStore::new(pool));
    let metrics = Arc::new(PerformanceMetrics::new());

    Ok(WorkerDeps { config, http, registry, notifications, phone_validator, store, metrics })
}

/// Block until the process receives a termination signal (Ctrl-C).
pub async fn wait_for_shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install ctrl-c handler, running until killed");
        std::future::pending::<()>().await;
    }
}
