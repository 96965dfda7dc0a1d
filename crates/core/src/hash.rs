//! Notification hash functions.
//!
//! The hash is the authoritative dedup key for the notifications service.
//! Each notification class has its own deterministic input formula; none of
//! them may be retried with a different hash on 409.

use chrono::NaiveDate;
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// One row of the cross-source snapshot state, as hashed by the Syncer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SyncerEntry {
    pub source: String,
    pub business_phones: Vec<String>,
    pub website_live: bool,
    pub business_open: bool,
}

#[derive(Serialize)]
struct SyncerHashPayload<'a> {
    entries: &'a [SyncerEntry],
}

/// `SHA256(JSON({entries: snapshot_rows}))` — one notification per distinct
/// disagreement state (§4.5).
///
/// `entries` must be in a stable order (callers sort by `source`) so the
/// same disagreement state always hashes to the same value.
pub fn syncer_hash(entries: &[SyncerEntry]) -> Result<String, serde_json::Error> {
    let payload = SyncerHashPayload { entries };
    let json = serde_json::to_string(&payload)?;
    Ok(sha256_hex(&json))
}

/// `SHA256("business_id:source:MM-DD-YYYY")` — one per (business, source,
/// local calendar date) (§4.6).
pub fn analyser_hash(business_id: Uuid, source: &str, date: NaiveDate) -> String {
    let input = format!("{}:{}:{}", business_id, source, date.format("%m-%d-%Y"));
    sha256_hex(&input)
}

/// `SHA256("business_id:MM-DD-YYYY")` — one per (business, day) (§4.7).
pub fn parked_domain_hash(business_id: Uuid, date: NaiveDate) -> String {
    let input = format!("{}:{}", business_id, date.format("%m-%d-%Y"));
    sha256_hex(&input)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn syncer_hash_is_deterministic_for_same_entries() {
        let entries = vec![SyncerEntry {
            source: "yelp-api-connector".into(),
            business_phones: vec!["5551234567".into()],
            website_live: true,
            business_open: true,
        }];
        assert_eq!(syncer_hash(&entries).unwrap(), syncer_hash(&entries).unwrap());
    }

    #[test]
    fn syncer_hash_changes_with_entries() {
        let a = vec![SyncerEntry {
            source: "yelp-api-connector".into(),
            business_phones: vec!["5551234567".into()],
            website_live: true,
            business_open: true,
        }];
        let b = vec![SyncerEntry {
            source: "yelp-api-connector".into(),
            business_phones: vec!["5559999999".into()],
            website_live: true,
            business_open: true,
        }];
        assert_ne!(syncer_hash(&a).unwrap(), syncer_hash(&b).unwrap());
    }

    #[test]
    fn analyser_hash_matches_literal_scenario() {
        let business_id = Uuid::parse_str("42e15fa3-0000-0000-0000-000000000000").unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 7, 29).unwrap();
        let expected_input = format!("{}:yelp-api-connector:07-29-2026", business_id);
        let mut hasher = Sha256::new();
        hasher.update(expected_input.as_bytes());
        let expected = hex::encode(hasher.finalize());
        assert_eq!(analyser_hash(business_id, "yelp-api-connector", date), expected);
    }

    #[test]
    fn parked_domain_hash_is_stable_per_day() {
        let business_id = Uuid::parse_str("42e15fa3-0000-0000-0000-000000000000").unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 7, 29).unwrap();
        assert_eq!(
            parked_domain_hash(business_id, date),
            parked_domain_hash(business_id, date)
        );
    }
}
