//! Statistics for discovery runs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Counters for one discovery run.
///
/// Every probed candidate lands in exactly one of `found`, `not_found` or
/// `errors`, so their sum equals `candidates_probed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryStats {
    /// Start of the probing phase
    pub started_at: Option<DateTime<Utc>>,

    /// End of the probing phase
    pub completed_at: Option<DateTime<Utc>>,

    /// Candidate keys produced by the templates (before deduplication)
    pub candidates_generated: usize,

    /// Candidate keys dropped as duplicates
    pub duplicates_removed: usize,

    /// Candidate keys dropped by the candidate limit
    pub candidates_truncated: usize,

    /// Candidate keys probed
    pub candidates_probed: usize,

    /// Probes that found an object
    pub found: usize,

    /// Probes that found nothing
    pub not_found: usize,

    /// Total bytes of found objects, where the probe reported a size
    pub bytes_found: u64,

    /// Probe errors other than "not found"
    pub errors: Vec<String>,
}

impl DiscoveryStats {
    /// Start counting now.
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Stamp the end of the run.
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Record a probe that found an object.
    pub fn record_found(&mut self, size: Option<u64>) {
        self.candidates_probed += 1;
        self.found += 1;
        self.bytes_found += size.unwrap_or(0);
    }

    /// Record a probe that found nothing.
    pub fn record_not_found(&mut self) {
        self.candidates_probed += 1;
        self.not_found += 1;
    }

    /// Record a failed probe.
    pub fn record_error(&mut self, error: impl ToString) {
        self.candidates_probed += 1;
        self.errors.push(error.to_string());
    }

    /// Wall-clock time between start and completion.
    pub fn duration(&self) -> Option<Duration> {
        Some(self.completed_at? - self.started_at?)
    }

    /// Whether any probe failed for a reason other than "not found".
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Failed probes.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Probes per second, `0.0` for a run that took no measurable time.
    pub fn probes_per_second(&self) -> Option<f64> {
        let millis = self.duration()?.num_milliseconds();
        if millis <= 0 {
            return Some(0.0);
        }
        Some(self.candidates_probed as f64 * 1000.0 / millis as f64)
    }
}
