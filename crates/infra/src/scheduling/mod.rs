//! Periodic workers (§4.4-§4.7, §5).
//!
//! Every worker owns a [`ticker::Ticker`] at a configured period and
//! performs a bounded unit of work per tick. Workers do not coordinate with
//! each other.

pub mod analyser_worker;
pub mod collection_worker;
pub mod error;
pub mod parked_worker;
pub mod syncer_worker;
pub mod ticker;

pub use analyser_worker::AnalyserWorker;
pub use collection_worker::CollectionWorker;
pub use error::{SchedulerError, SchedulerResult};
pub use parked_worker::ParkedDomainWorker;
pub use syncer_worker::SyncerWorker;
