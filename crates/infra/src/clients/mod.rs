//! HTTP clients for the registry, notifications, and phone-validation
//! services consumed by the pipeline (§6).
//!
//! These are thin `reqwest`-via-[`crate::http::HttpClient`] adapters with no
//! OAuth or circuit-breaking — the services are internal, low-traffic, and
//! the original behavior is a direct call with retry on transient failure.

mod error;
pub mod notifications;
pub mod phone_validator;
pub mod registry;

pub use notifications::HttpNotificationClient;
pub use phone_validator::HttpPhoneValidator;
pub use registry::HttpRegistryClient;
