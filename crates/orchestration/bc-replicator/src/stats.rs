//! Statistics for replication runs.

use bc_types::{CopyResult, CopyStatus};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A key whose copy failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedKey {
    pub key: String,
    pub error: String,
}

/// Statistics collected during a replication run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplicationStats {
    /// When replication started
    pub started_at: Option<DateTime<Utc>>,

    /// When replication completed
    pub completed_at: Option<DateTime<Utc>>,

    /// Keys copied
    pub copied: usize,

    /// Keys that failed
    pub failed: usize,

    /// Keys already present in the destination
    pub skipped: usize,

    /// Keys reported by a dry run
    pub dry_run: usize,

    /// Failed keys with their errors, in input order
    pub failed_keys: Vec<FailedKey>,
}

impl ReplicationStats {
    /// Create a new stats tracker with the current time as start time.
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Mark replication as complete with the current time.
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Record one outcome.
    pub fn record(&mut self, result: &CopyResult) {
        match result.status {
            CopyStatus::Copied => self.copied += 1,
            CopyStatus::Skipped => self.skipped += 1,
            CopyStatus::DryRun => self.dry_run += 1,
            CopyStatus::Failed => {
                self.failed += 1;
                self.failed_keys.push(FailedKey {
                    key: result.key.clone(),
                    error: result.error.clone().unwrap_or_default(),
                });
            }
        }
    }

    /// Number of keys attempted.
    pub fn total(&self) -> usize {
        self.copied + self.failed + self.skipped + self.dry_run
    }

    /// Check if any key failed.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Fraction of attempted keys that failed (0.0 when nothing was attempted).
    pub fn failure_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.failed as f64 / total as f64,
        }
    }

    /// Get the duration of the replication run.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Calculate the throughput in objects per second.
    pub fn objects_per_second(&self) -> Option<f64> {
        self.duration().map(|d| {
            let secs = d.num_milliseconds() as f64 / 1000.0;
            if secs > 0.0 {
                self.total() as f64 / secs
            } else {
                0.0
            }
        })
    }
}
