//! bc-replicator - Server-side copy engine for blindcopy.
//!
//! Copies discovered keys from the source bucket to the destination at
//! bounded concurrency. Each key is attempted once; failures are reported
//! per key and never abort the batch.

pub mod config;
pub mod replicator;
pub mod stats;

pub use config::ReplicatorConfig;
pub use replicator::{ReplicationOutcome, Replicator};
pub use stats::{FailedKey, ReplicationStats};
