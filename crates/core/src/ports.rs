//! Port interfaces between core business logic and infrastructure.
//!
//! These traits define the boundaries infra adapters implement; core never
//! depends on a concrete HTTP client or database driver.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pulsearc_domain::{BusinessMetadata, BusinessUpdate, Notification, PulseArcError, TimeseriesPoint};
use uuid::Uuid;

/// Read-only accessor for the business registry, shared by every worker
/// that needs the current business list (§4.3, §6).
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Fetch the full list of businesses known to the registry.
    async fn get_businesses(&self) -> Result<Vec<BusinessMetadata>, PulseArcError>;
}

/// Snapshot + time-series persistence for observations (§4.3).
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Read the registry table directly (the store shares the Postgres
    /// backend with the registry).
    async fn get_all_metadata(&self) -> Result<Vec<BusinessMetadata>, PulseArcError>;

    /// Upsert the snapshot row, append a time-series row, and touch
    /// `last_update` on the registry entry, all in one transaction.
    async fn upsert(&self, update: BusinessUpdate) -> Result<(), PulseArcError>;

    /// All snapshot rows for `business_id`, keyed by source.
    async fn get_snapshot(
        &self,
        business_id: Uuid,
    ) -> Result<BTreeMap<String, pulsearc_domain::BusinessData>, PulseArcError>;

    /// Time-series points for `business_id` within `[start, end]`, grouped by
    /// source, in `event_timestamp`-descending order.
    async fn get_timeseries(
        &self,
        business_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<BTreeMap<String, Vec<TimeseriesPoint>>, PulseArcError>;

    /// The most recent `count` time-series points per source for
    /// `business_id`, in `event_timestamp`-descending order. Limiting is
    /// per-source, not a global top-N.
    async fn get_timeseries_count(
        &self,
        business_id: Uuid,
        count: i64,
    ) -> Result<BTreeMap<String, Vec<TimeseriesPoint>>, PulseArcError>;
}

/// Creates notifications against the notifications service; dedupes via a
/// caller-supplied hash (§4.8).
#[async_trait]
pub trait NotificationClient: Send + Sync {
    /// POST the notification. A 409 (hash already exists) must be treated as
    /// success by the implementation — callers only ever see `Ok` or a real
    /// failure. Must not retry on its own.
    async fn create(&self, notification: Notification) -> Result<(), PulseArcError>;
}

/// Outcome of validating a batch of phone numbers against the phone
/// validation service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneValidationResult {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

/// Advisory-only phone number validator (§9: the validator's output is
/// consulted for observability but never filters the extracted set).
#[async_trait]
pub trait PhoneValidator: Send + Sync {
    async fn validate(
        &self,
        country_code: &str,
        numbers: &[String],
    ) -> Result<PhoneValidationResult, PulseArcError>;
}
