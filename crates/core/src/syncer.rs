//! Cross-source disagreement detection (§4.5).
//!
//! Pure comparison logic over a snapshot of `source -> BusinessData` for a
//! single business. The scheduling/IO side (infra) owns fetching the
//! snapshot and dispatching the resulting notification.

use std::collections::BTreeMap;

use pulsearc_domain::BusinessData;

use crate::hash::SyncerEntry;

/// Reduced tuple used for comparison: `business_open` is intentionally
/// excluded (preserves source behavior, §9).
#[derive(Debug, Clone, PartialEq, Eq)]
struct ReducedTuple {
    business_phones: Vec<String>,
    website_live: bool,
}

fn reduce(data: &BusinessData) -> ReducedTuple {
    ReducedTuple { business_phones: data.business_phones.clone(), website_live: data.website_live }
}

/// Result of comparing a business's per-source snapshots.
pub struct Disagreement {
    /// Source names involved, sorted for deterministic notification text.
    pub sources: Vec<String>,
    /// Hash input entries, sorted by source.
    pub entries: Vec<SyncerEntry>,
}

/// Pairwise-compare the reduced tuples across sources. Returns `Some` if any
/// two sources disagree.
///
/// `snapshots` uses a `BTreeMap` so iteration order (and therefore notification
/// text and hash input) is deterministic regardless of fetch order.
pub fn detect_disagreement(snapshots: &BTreeMap<String, BusinessData>) -> Option<Disagreement> {
    if snapshots.len() < 2 {
        return None;
    }

    let mut reduced: Vec<(&String, ReducedTuple)> =
        snapshots.iter().map(|(source, data)| (source, reduce(data))).collect();
    reduced.sort_by(|a, b| a.0.cmp(b.0));

    let first = &reduced[0].1;
    let any_differ = reduced.iter().any(|(_, tuple)| tuple != first);

    if !any_differ {
        return None;
    }

    let sources = reduced.iter().map(|(s, _)| (*s).clone()).collect();
    let entries = snapshots
        .iter()
        .map(|(source, data)| SyncerEntry {
            source: source.clone(),
            business_phones: data.business_phones.clone(),
            website_live: data.website_live,
            business_open: data.business_open,
        })
        .collect();

    Some(Disagreement { sources, entries })
}

/// Render the notification text for a disagreement (§4.5).
pub fn notification_text(business_id: impl std::fmt::Display, sources: &[String]) -> String {
    format!(
        "found differences in data sources [{}] for business {}",
        sources.join(", "),
        business_id
    )
}
