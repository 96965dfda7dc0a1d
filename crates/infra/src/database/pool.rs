//! Postgres connection pool construction.
//!
//! One pool per worker process (§5: "connection pooling is per worker").

use deadpool_postgres::{Config as PoolConfig, Pool, Runtime};
use pulsearc_domain::PulseArcError;
use tokio_postgres::NoTls;

/// Build a pool from a `postgres://` URL.
///
/// TLS is not configured here: the pipeline's internal Postgres traffic runs
/// over a private network, matching the other internal-service clients in
/// this crate that skip mutual TLS for the same reason.
pub fn build_pool(postgres_url: &str) -> Result<Pool, PulseArcError> {
    let mut config = PoolConfig::new();
    config.url = Some(postgres_url.to_string());

    config
        .create_pool(Some(Runtime::Tokio1), NoTls)
        .map_err(|e| PulseArcError::Config(format!("failed to build postgres pool: {e}")))
}
