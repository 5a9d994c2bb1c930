//! Configuration types for the discoverer.

use bc_types::{DEFAULT_MAX_WORKERS, DEFAULT_PROGRESS_INTERVAL, ReplicationConfig, Vocabulary};
use serde::{Deserialize, Serialize};

use crate::builtin::builtin_vocabulary;

/// Configuration for a discovery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Candidate vocabularies
    pub vocabulary: Vocabulary,

    /// Merge the built-in vocabulary after the user's entries
    pub builtin_vocabulary: bool,

    /// Maximum concurrent probes
    pub max_workers: usize,

    /// Maximum number of candidates to probe (0 = unlimited)
    pub max_candidates: usize,

    /// Probes between progress lines (0 = disabled)
    pub progress_interval: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            builtin_vocabulary: false,
            max_workers: DEFAULT_MAX_WORKERS,
            max_candidates: 0,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl DiscoveryConfig {
    /// Create a new discovery configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vocabularies.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Enable or disable the built-in vocabulary.
    pub fn with_builtin_vocabulary(mut self, enabled: bool) -> Self {
        self.builtin_vocabulary = enabled;
        self
    }

    /// Set the maximum concurrent probes.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Set the maximum number of candidates to probe.
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Set the progress interval.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// The vocabulary candidates are generated from, built-ins included.
    pub fn effective_vocabulary(&self) -> Vocabulary {
        if self.builtin_vocabulary {
            self.vocabulary.merged(&builtin_vocabulary())
        } else {
            self.vocabulary.clone()
        }
    }
}

impl From<&ReplicationConfig> for DiscoveryConfig {
    fn from(config: &ReplicationConfig) -> Self {
        Self {
            vocabulary: config.vocabulary.clone(),
            builtin_vocabulary: config.builtin_vocabulary,
            max_workers: config.max_workers,
            max_candidates: config.max_candidates,
            progress_interval: config.progress_interval,
        }
    }
}
