//! Domain data types shared across the monitoring pipeline.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A registry entry. Created and edited only by the external registry;
/// read-only to the core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessMetadata {
    pub business_id: Uuid,
    pub business_name: String,
    pub business_uri: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl BusinessMetadata {
    /// Look up `metadata.yelp_business_id`, validating it as a non-empty string.
    pub fn yelp_business_id(&self) -> Option<&str> {
        self.metadata.get("yelp_business_id").and_then(Value::as_str)
    }

    /// Look up `metadata.google_place_id`, validating it as a non-empty string.
    pub fn google_place_id(&self) -> Option<&str> {
        self.metadata.get("google_place_id").and_then(Value::as_str)
    }
}

/// A single observation payload produced by a collector.
///
/// No timestamp is carried here; placement in the snapshot vs. time-series
/// tables provides temporal semantics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BusinessData {
    /// Short lowercase identifier of the collector, e.g. `web-scraper`.
    pub source: String,
    pub website_live: bool,
    pub business_open: bool,
    /// Normalized digit-only phone strings, in the order the collector found them.
    pub business_phones: Vec<String>,
}

/// The unit passed between a Collector and the Observation Store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessUpdate {
    pub metadata: BusinessMetadata,
    pub data: BusinessData,
}

/// A time-series observation with its server-assigned timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeseriesPoint {
    pub event_timestamp: DateTime<Utc>,
    pub website_live: bool,
    pub business_open: bool,
    pub business_phones: Vec<String>,
}

/// A notification destined for the notifications service.
///
/// `notification_hash` is a caller-computed SHA-256 hex digest; the
/// notifications service rejects duplicates (unique on hash).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub business_id: Uuid,
    pub business_name: String,
    pub event_timestamp: DateTime<Utc>,
    pub notification_text: String,
    pub notification_hash: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

/// Typed view of `metadata.yelp_business_id`, parsed at the collector boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct YelpMetadata {
    pub yelp_business_id: String,
}

/// Typed view of `metadata.google_place_id`, parsed at the collector boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoogleMetadata {
    pub google_place_id: String,
}
