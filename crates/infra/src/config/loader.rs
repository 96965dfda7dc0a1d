//! Configuration loader
//!
//! Loads the pipeline's configuration from environment variables. All
//! workers read the same set of variables (§6) and each binary picks the
//! subset it needs.
//!
//! ## Loading strategy
//! Environment-only: strings are read directly and parsed with built-in
//! fallback defaults. There is no file-based config for this pipeline — every
//! deployment target (container, systemd unit, CI) sets environment
//! variables directly.
//!
//! ## Environment variables
//! - `POSTGRES_URL`: Postgres connection string (required)
//! - `COLLECTION_INTERVAL_MINUTES`: Collection Worker tick period (default 15)
//! - `CHECK_INTERVAL_MINUTES`: Parked-Domain Checker tick period (default 60)
//! - `ANALYSIS_INTERVAL_MINUTES`: Time-Series Analyser tick period (default 30)
//! - `YELP_BASE_API`, `YELP_API_KEY`
//! - `GOOGLE_BASE_API`, `GOOGLE_API_KEY`
//! - `TRF_API_HOST` / `TRF_API_PORT`: registry HTTP facade
//! - `NOTIFY_API_HOST` / `NOTIFY_API_PORT`: notifications service
//! - `UTILS_API_HOST` / `UTILS_API_PORT`: phone validation service
//! - `LOG_LEVEL`: tracing filter directive (default "info")

use pulsearc_domain::constants::{
    DEFAULT_ANALYSIS_INTERVAL_MINUTES, DEFAULT_CHECK_INTERVAL_MINUTES,
    DEFAULT_COLLECTION_INTERVAL_MINUTES,
};
use pulsearc_domain::{PulseArcError, Result};

/// Fully resolved configuration for one worker process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub postgres_url: String,
    pub collection_interval_minutes: u64,
    pub check_interval_minutes: u64,
    pub analysis_interval_minutes: u64,
    pub yelp_base_api: String,
    pub yelp_api_key: String,
    pub google_base_api: String,
    pub google_api_key: String,
    pub trf_api_host: String,
    pub trf_api_port: u16,
    pub notify_api_host: String,
    pub notify_api_port: u16,
    pub utils_api_host: String,
    pub utils_api_port: u16,
    pub log_level: String,
}

impl AppConfig {
    pub fn registry_base_url(&self) -> String {
        format!("http://{}:{}", self.trf_api_host, self.trf_api_port)
    }

    pub fn notifications_base_url(&self) -> String {
        format!("http://{}:{}", self.notify_api_host, self.notify_api_port)
    }

    pub fn phone_validator_base_url(&self) -> String {
        format!("http://{}:{}", self.utils_api_host, self.utils_api_port)
    }
}

/// Load configuration from the environment, falling back to built-in
/// defaults for everything except `POSTGRES_URL`, which is required.
///
/// # Errors
/// Returns `PulseArcError::Config` if `POSTGRES_URL` is missing or any
/// interval cannot be parsed as a positive integer.
pub fn load() -> Result<AppConfig> {
    let postgres_url = required_env("POSTGRES_URL")?;

    Ok(AppConfig {
        postgres_url,
        collection_interval_minutes: parsed_env_or(
            "COLLECTION_INTERVAL_MINUTES",
            DEFAULT_COLLECTION_INTERVAL_MINUTES,
        )?,
        check_interval_minutes: parsed_env_or(
            "CHECK_INTERVAL_MINUTES",
            DEFAULT_CHECK_INTERVAL_MINUTES,
        )?,
        analysis_interval_minutes: parsed_env_or(
            "ANALYSIS_INTERVAL_MINUTES",
            DEFAULT_ANALYSIS_INTERVAL_MINUTES,
        )?,
        yelp_base_api: env_or("YELP_BASE_API", "https://api.yelp.com/v3/businesses"),
        yelp_api_key: env_or("YELP_API_KEY", ""),
        google_base_api: env_or(
            "GOOGLE_BASE_API",
            "https://maps.googleapis.com/maps/api/place/details/json",
        ),
        google_api_key: env_or("GOOGLE_API_KEY", ""),
        trf_api_host: env_or("TRF_API_HOST", "localhost"),
        trf_api_port: parsed_env_or("TRF_API_PORT", 8080u16)?,
        notify_api_host: env_or("NOTIFY_API_HOST", "localhost"),
        notify_api_port: parsed_env_or("NOTIFY_API_PORT", 8081u16)?,
        utils_api_host: env_or("UTILS_API_HOST", "localhost"),
        utils_api_port: parsed_env_or("UTILS_API_PORT", 8082u16)?,
        log_level: env_or("LOG_LEVEL", "info"),
    })
}

fn required_env(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| PulseArcError::Config(format!("missing required environment variable: {key}")))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| PulseArcError::Config(format!("invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    #[test]
    fn load_fails_without_postgres_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        std::env::remove_var("POSTGRES_URL");
        let result = load();
        assert!(matches!(result, Err(PulseArcError::Config(_))));
    }

    #[test]
    fn load_applies_defaults_when_optional_vars_unset() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        std::env::set_var("POSTGRES_URL", "postgres://localhost/trf");
        std::env::remove_var("COLLECTION_INTERVAL_MINUTES");

        let config = load().expect("should load with only postgres_url set");
        assert_eq!(config.collection_interval_minutes, DEFAULT_COLLECTION_INTERVAL_MINUTES);
        assert_eq!(config.log_level, "info");

        std::env::remove_var("POSTGRES_URL");
    }

    #[test]
    fn load_rejects_invalid_interval() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        std::env::set_var("POSTGRES_URL", "postgres://localhost/trf");
        std::env::set_var("COLLECTION_INTERVAL_MINUTES", "not-a-number");

        let result = load();
        assert!(matches!(result, Err(PulseArcError::Config(_))));

        std::env::remove_var("POSTGRES_URL");
        std::env::remove_var("COLLECTION_INTERVAL_MINUTES");
    }

    #[test]
    fn registry_base_url_formats_host_and_port() {
        let config = AppConfig {
            postgres_url: String::new(),
            collection_interval_minutes: 1,
            check_interval_minutes: 1,
            analysis_interval_minutes: 1,
            yelp_base_api: String::new(),
            yelp_api_key: String::new(),
            google_base_api: String::new(),
            google_api_key: String::new(),
            trf_api_host: "registry.internal".into(),
            trf_api_port: 9000,
            notify_api_host: String::new(),
            notify_api_port: 0,
            utils_api_host: String::new(),
            utils_api_port: 0,
            log_level: String::new(),
        };
        assert_eq!(config.registry_base_url(), "http://registry.internal:9000");
    }
}
