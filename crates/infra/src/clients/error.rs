//! Shared error handling for the small HTTP clients in this module.

use pulsearc_domain::PulseArcError;
use reqwest::StatusCode;
use tracing::debug;

/// Map a response status the caller has already decided is an error into a
/// `PulseArcError`, attaching the response body when it is useful context.
pub(crate) fn map_status_error(context: &str, status: StatusCode, body: &str) -> PulseArcError {
    let snippet: String = body.chars().take(200).collect();
    debug!(%context, %status, body = %snippet, "client received error response");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            PulseArcError::Auth(format!("{context}: {status}"))
        }
        StatusCode::NOT_FOUND => PulseArcError::NotFound(format!("{context}: {status}")),
        StatusCode::TOO_MANY_REQUESTS => PulseArcError::Network(format!("{context}: {status}")),
        s if s.is_client_error() => {
            PulseArcError::InvalidInput(format!("{context}: {status} {snippet}"))
        }
        _ => PulseArcError::Network(format!("{context}: {status} {snippet}")),
    }
}
