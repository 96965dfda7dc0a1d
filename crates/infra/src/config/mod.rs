//! Configuration loading and management
//!
//! Loads per-worker configuration from the environment (§6). Unknown keys
//! are ignored; missing keys fall back to built-in defaults.

pub mod loader;

pub use loader::{load, AppConfig};
