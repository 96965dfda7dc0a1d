//! # PulseArc Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The `Collector` capability and its optional streaming variant
//! - Phone number extraction and normalization
//! - Notification hash functions
//! - Cross-source (Syncer) and single-source (Analyser) change detection
//! - Parked-domain signature detection
//! - Port/adapter interfaces (traits) implemented by `pulsearc-infra`
//!
//! ## Architecture Principles
//! - Only depends on `pulsearc-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod analyser;
pub mod collector;
pub mod hash;
pub mod parked;
pub mod phone;
pub mod ports;
pub mod syncer;

pub use collector::{Collector, StreamingCollector};
pub use ports::{
    NotificationClient, ObservationStore, PhoneValidationResult, PhoneValidator, RegistryClient,
};
