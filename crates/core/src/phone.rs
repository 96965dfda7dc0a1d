//! Phone number extraction and normalization.
//!
//! Pure functions: no I/O, no external state. The regex set and their order
//! are part of the contract — reproduced verbatim from the reference
//! implementation's pattern table.

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered phone-number patterns. Order determines scan order, which in turn
/// determines first-seen dedup order — do not reorder.
static PHONE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        (
            "uk-1",
            Regex::new(
                r"((\(?0\d{4}\)?\s?\d{3}\s?\d{3})|(\(?0\d{3}\)?\s?\d{3}\s?\d{4})|(\(?0\d{2}\)?\s?\d{4}\s?\d{4}))(\s?#(\d{4}|\d{3}))?",
            )
            .expect("uk-1 pattern is valid"),
        ),
        (
            "uk-2",
            Regex::new(r"(\+44\s?7\d{3}|\(?07\d{3}\)?)\s?\d{3}\s?\d{3}")
                .expect("uk-2 pattern is valid"),
        ),
        (
            "uk-3",
            Regex::new(
                r"(((\+44\s?\d{4}|\(?0\d{4}\)?)\s?\d{3}\s?\d{3})|((\+44\s?\d{3}|\(?0\d{3}\)?)\s?\d{3}\s?\d{4})|((\+44\s?\d{2}|\(?0\d{2}\)?)\s?\d{4}\s?\d{4}))(\s?#(\d{4}|\d{3}))?",
            )
            .expect("uk-3 pattern is valid"),
        ),
        ("us-1", Regex::new(r"[2-9]\d{2}-\d{3}-\d{4}").expect("us-1 pattern is valid")),
        (
            "us-2",
            Regex::new(r"((\(\d{3}\)?)|(\d{3}))([\s\-./]?)(\d{3})([\s\-./]?)(\d{4})")
                .expect("us-2 pattern is valid"),
        ),
        (
            "us-3",
            Regex::new(r"\(?\d{3}\)?[\s\-]?\d{3}[\s\-]?\d{4}").expect("us-3 pattern is valid"),
        ),
    ]
});

/// Strip `-`, space, `(`, `)`, `+` from a phone number.
///
/// Idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '-' | ' ' | '(' | ')' | '+')).collect()
}

/// Scan `text` with the ordered pattern list and return normalized matches,
/// deduplicated while preserving first-seen order.
///
/// Idempotent given a stable input: running on the concatenation of the
/// extracted numbers yields the same sequence back.
pub fn extract(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut matches = Vec::new();

    for (_code, pattern) in PHONE_PATTERNS.iter() {
        for raw_match in pattern.find_iter(text) {
            let cleaned = normalize(raw_match.as_str());
            if !cleaned.is_empty() && seen.insert(cleaned.clone()) {
                matches.push(cleaned);
            }
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation() {
        assert_eq!(normalize("+1 (555) 123-4567"), "15551234567");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("(555) 123-4567");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn extract_finds_us_number() {
        let found = extract("Call us at 555-123-4567 for details.");
        assert_eq!(found, vec!["5551234567".to_string()]);
    }

    #[test]
    fn extract_dedups_preserving_first_seen_order() {
        let found = extract("Phone: 555-123-4567, again 555-123-4567, also (555) 123-4567.");
        assert_eq!(found, vec!["5551234567".to_string()]);
    }

    #[test]
    fn extract_is_order_deterministic_across_runs() {
        let text = "Reach us on 555-123-4567 or 020 7946 0958.";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn extract_returns_empty_when_no_match() {
        assert!(extract("no phone numbers in this sentence").is_empty());
    }
}
