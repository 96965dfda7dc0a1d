//! Parked-domain signature detection (§4.7).

use pulsearc_domain::constants::GODADDY_PARKED_SIGNATURES;

/// A body-substring signature predicate. `body` is already lowercased.
pub type SignaturePredicate = fn(&str) -> bool;

/// GoDaddy's "this domain is parked" placeholder page.
pub fn godaddy_parked(body_lowercase: &str) -> bool {
    GODADDY_PARKED_SIGNATURES.iter().any(|signature| body_lowercase.contains(signature))
}

/// Signature predicates checked against every fetched page body, in order.
pub const PARKED_DOMAIN_SIGNATURES: &[SignaturePredicate] = &[godaddy_parked];

/// Lowercase `body` and test it against every registered signature.
pub fn is_parked(body: &str) -> bool {
    let lowered = body.to_lowercase();
    PARKED_DOMAIN_SIGNATURES.iter().any(|signature| signature(&lowered))
}

/// Render the notification text for a detected parked domain (§4.7).
pub fn notification_text(business_id: impl std::fmt::Display, uri: &str) -> String {
    format!("Found parked domain for business {} at URI {}", business_id, uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_godaddy_parked_message() {
        let body = "This Web Page is Parked FREE, Courtesy of GoDaddy";
        assert!(is_parked(body));
    }

    #[test]
    fn detects_godaddy_broker_message() {
        let body = "our domain broker service may be able to get it for you today";
        assert!(is_parked(body));
    }

    #[test]
    fn ignores_normal_pages() {
        assert!(!is_parked("Welcome to Acme Foods, open daily from 9 to 5."));
    }
}
