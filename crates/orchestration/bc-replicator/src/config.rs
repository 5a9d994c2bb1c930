//! Configuration types for the replicator.

use bc_types::{DEFAULT_MAX_WORKERS, DEFAULT_PROGRESS_INTERVAL, ReplicationConfig};
use serde::{Deserialize, Serialize};

/// Configuration for a replication run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicatorConfig {
    /// Maximum concurrent copies
    pub max_workers: usize,

    /// Report keys as `dry-run` without copying
    pub dry_run: bool,

    /// Probe the destination first and report existing keys as `skipped`
    pub skip_existing: bool,

    /// Completions between progress lines (0 = disabled)
    pub progress_interval: usize,
}

impl Default for ReplicatorConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            dry_run: false,
            skip_existing: false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl ReplicatorConfig {
    /// Create a new replicator configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum concurrent copies.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Enable or disable dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enable or disable skip-existing mode.
    pub fn with_skip_existing(mut self, skip_existing: bool) -> Self {
        self.skip_existing = skip_existing;
        self
    }

    /// Set the progress interval.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }
}

impl From<&ReplicationConfig> for ReplicatorConfig {
    fn from(config: &ReplicationConfig) -> Self {
        Self {
            max_workers: config.max_workers,
            dry_run: config.dry_run,
            skip_existing: config.skip_existing,
            progress_interval: config.progress_interval,
        }
    }
}
