//! Run configuration.

use bc_error::{BcError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::Vocabulary;

/// Default bound on concurrent probes or copies.
pub const DEFAULT_MAX_WORKERS: usize = 20;

/// Default run artifact location.
pub const DEFAULT_OBJECT_LIST_FILE: &str = "discovered_objects.txt";

/// Default number of operations between progress lines.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 500;

/// A bucket and the region its client is bound to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketLocation {
    /// Bucket name
    pub bucket: String,

    /// Region identifier (e.g. "us-east-1")
    pub region: String,
}

impl BucketLocation {
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
        }
    }
}

impl std::fmt::Display for BucketLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s3://{} ({})", self.bucket, self.region)
    }
}

/// Configuration for one discovery + replication run.
///
/// Built once by the caller and passed to each engine; [`validate`](Self::validate)
/// is the single place input is checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicationConfig {
    /// Where objects are discovered and copied from
    pub source: BucketLocation,

    /// Where objects are copied to
    pub destination: BucketLocation,

    /// Maximum concurrent probes (discovery) or copies (replication)
    pub max_workers: usize,

    /// Candidate vocabularies
    pub vocabulary: Vocabulary,

    /// Merge the built-in common-name vocabulary after the user's entries
    pub builtin_vocabulary: bool,

    /// Path of the run artifact
    pub object_list_file: PathBuf,

    /// Skip discovery when the run artifact already exists
    pub reuse_object_list: bool,

    /// Report what would be copied without copying
    pub dry_run: bool,

    /// Probe the destination first and skip keys already present
    pub skip_existing: bool,

    /// Upper bound on probed candidates (0 = unlimited)
    pub max_candidates: usize,

    /// Operations between progress log lines (0 = disabled)
    pub progress_interval: usize,

    /// Copy failure rate above which the run reports partial failure
    pub max_failure_rate: Option<f64>,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            source: BucketLocation::default(),
            destination: BucketLocation::default(),
            max_workers: DEFAULT_MAX_WORKERS,
            vocabulary: Vocabulary::default(),
            builtin_vocabulary: false,
            object_list_file: PathBuf::from(DEFAULT_OBJECT_LIST_FILE),
            reuse_object_list: false,
            dry_run: false,
            skip_existing: false,
            max_candidates: 0,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            max_failure_rate: None,
        }
    }
}

impl ReplicationConfig {
    /// Create a configuration for the given source and destination.
    pub fn new(source: BucketLocation, destination: BucketLocation) -> Self {
        Self {
            source,
            destination,
            ..Default::default()
        }
    }

    /// Set the worker bound.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Set the candidate vocabularies.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Enable or disable the built-in vocabulary.
    pub fn with_builtin_vocabulary(mut self, enabled: bool) -> Self {
        self.builtin_vocabulary = enabled;
        self
    }

    /// Set the run artifact path.
    pub fn with_object_list_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.object_list_file = path.into();
        self
    }

    /// Reuse an existing run artifact instead of discovering.
    pub fn with_reuse_object_list(mut self, reuse: bool) -> Self {
        self.reuse_object_list = reuse;
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

    /// Set the candidate limit.
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Set the progress interval.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Set the failure rate threshold.
    pub fn with_max_failure_rate(mut self, rate: f64) -> Self {
        self.max_failure_rate = Some(rate);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validate_location("source", &self.source)?;
        validate_location("destination", &self.destination)?;

        if self.max_workers == 0 {
            return Err(BcError::Config("max_workers must be at least 1".to_string()));
        }
        if self.object_list_file.as_os_str().is_empty() {
            return Err(BcError::Config(
                "object_list_file must not be empty".to_string(),
            ));
        }
        if let Some(rate) = self.max_failure_rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err(BcError::Config(format!(
                    "max_failure_rate must be within 0..=1, got {rate}"
                )));
            }
        }
        Ok(())
    }
}

fn validate_location(role: &str, location: &BucketLocation) -> Result<()> {
    if location.bucket.trim().is_empty() {
        return Err(BcError::Config(format!("{role} bucket is required")));
    }
    if location.region.trim().is_empty() {
        return Err(BcError::Config(format!("{role} region is required")));
    }
    Ok(())
}
