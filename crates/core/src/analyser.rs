//! Single-source time-series transition detection (§4.6).

use pulsearc_domain::TimeseriesPoint;

fn fields_changed(current: &TimeseriesPoint, predecessor: &TimeseriesPoint) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if current.website_live != predecessor.website_live {
        changed.push("website_live");
    }
    if current.business_phones != predecessor.business_phones {
        changed.push("business_phones");
    }
    if current.business_open != predecessor.business_open {
        changed.push("business_open");
    }
    changed
}

/// Walk `points` (most-recent-first) from the second entry onward, comparing
/// each point against its immediate predecessor. Stops at the first
/// difference and returns the changed field names.
///
/// Returns `None` if fewer than two points are available or no difference is
/// found within the window.
pub fn detect_transition(points: &[TimeseriesPoint]) -> Option<Vec<&'static str>> {
    for window in points.windows(2) {
        let changed = fields_changed(&window[0], &window[1]);
        if !changed.is_empty() {
            return Some(changed);
        }
    }
    None
}

/// Render the notification text for a detected transition (§4.6).
pub fn notification_text(
    business_id: impl std::fmt::Display,
    source: &str,
    changed_fields: &[&str],
) -> String {
    format!(
        "Found change in timeseries business data for {} in source {}: the following fields have changed [{}]",
        business_id,
        source,
        changed_fields.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn point(open: bool, hours_ago: i64) -> TimeseriesPoint {
        TimeseriesPoint {
            event_timestamp: Utc.timestamp_opt(1_700_000_000 - hours_ago * 3600, 0).unwrap(),
            website_live: true,
            business_open: open,
            business_phones: vec!["5551234567".to_string()],
        }
    }

    #[test]
    fn detects_business_open_transition_matching_literal_scenario() {
        // descending-time order, most recent first: [true, true, true, false, true]
        let points =
            vec![point(true, 0), point(true, 1), point(true, 2), point(false, 3), point(true, 4)];
        let changed = detect_transition(&points).expect("should detect a transition");
        assert_eq!(changed, vec!["business_open"]);
    }

    #[test]
    fn no_transition_when_all_points_match() {
        let points = vec![point(true, 0), point(true, 1), point(true, 2)];
        assert!(detect_transition(&points).is_none());
    }

    #[test]
    fn stops_scanning_at_first_difference() {
        let points =
            vec![point(true, 0), point(false, 1), point(true, 2), point(false, 3)];
        // first comparison (idx1 vs idx0) already differs; later flips are not reported
        let changed = detect_transition(&points).unwrap();
        assert_eq!(changed, vec!["business_open"]);
    }

    #[test]
    fn is_a_pure_function_of_its_input() {
        let points = vec![point(true, 0), point(false, 1)];
        assert_eq!(detect_transition(&points), detect_transition(&points));
    }
}
