//! Scheduler error types

use std::time::Duration;

use pulsearc_domain::PulseArcError;
use thiserror::Error;

use crate::errors::InfraError;

/// Scheduler-specific errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Scheduler is already running
    #[error("scheduler already running")]
    AlreadyRunning,

    /// Scheduler is not running
    #[error("scheduler not running")]
    NotRunning,

    /// The join handle for the background task did not resolve before the
    /// shutdown deadline elapsed.
    #[error("scheduler task join timed out after {duration:?}")]
    Timeout { duration: Duration, source: tokio::time::error::Elapsed },

    /// The background task panicked or was cancelled unexpectedly.
    #[error("scheduler task failed: {0}")]
    TaskJoinFailed(String),
}

impl From<SchedulerError> for InfraError {
    fn from(err: SchedulerError) -> Self {
        let pulse_err = match err {
            SchedulerError::AlreadyRunning | SchedulerError::NotRunning => {
                PulseArcError::InvalidInput(err.to_string())
            }
            SchedulerError::Timeout { .. } | SchedulerError::TaskJoinFailed(_) => {
                PulseArcError::Internal(err.to_string())
            }
        };
        InfraError(pulse_err)
    }
}

impl From<SchedulerError> for PulseArcError {
    fn from(err: SchedulerError) -> Self {
        InfraError::from(err).into()
    }
}

/// Convenience type alias for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;
