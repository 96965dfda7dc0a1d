//! # texas-real-foods infrastructure
//!
//! Infrastructure implementations of the core domain ports.
//!
//! This crate contains:
//! - Configuration loading from the environment
//! - Postgres persistence (the Observation Store)
//! - HTTP client implementations (registry, notifications, phone validation)
//! - Data-Source Collectors (web scraper, Yelp, Google Places)
//! - Background workers (Collection Worker, Syncer, Analyser, Parked-Domain Checker)
//!
//! ## Architecture
//! - Implements traits defined in `pulsearc-core`
//! - Depends on `pulsearc-core` and `pulsearc-domain`
//! - Contains all "impure" code (I/O, database, HTTP)

pub mod clients;
pub mod collectors;
pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod observability;
pub mod scheduling;

pub use clients::{HttpNotificationClient, HttpPhoneValidator, HttpRegistryClient};
pub use collectors::{GoogleCollector, WebScraperCollector, YelpCollector};
pub use config::{load, AppConfig};
pub use database::{build_pool, PostgresObservationStore};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use scheduling::{
    AnalyserWorker, CollectionWorker, ParkedDomainWorker, SchedulerError, SchedulerResult,
    SyncerWorker,
};
