//! Postgres persistence: connection pooling and the Observation Store (§4.3).

pub mod observation_store;
pub mod pool;

pub use observation_store::PostgresObservationStore;
pub use pool::build_pool;
