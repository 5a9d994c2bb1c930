//! Per-key replication outcomes.

use serde::{Deserialize, Serialize};

/// Status of one replication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CopyStatus {
    /// The server-side copy succeeded
    Copied,
    /// The copy (or the destination check before it) failed
    Failed,
    /// Skip-existing mode found the key already in the destination
    Skipped,
    /// Dry-run mode; no copy was issued
    DryRun,
}

impl std::fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Copied => write!(f, "copied"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
            Self::DryRun => write!(f, "dry-run"),
        }
    }
}

/// Outcome of replicating one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyResult {
    /// The object key (identical in source and destination)
    pub key: String,

    /// What happened
    pub status: CopyStatus,

    /// Error detail, present only for [`CopyStatus::Failed`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CopyResult {
    pub fn copied(key: impl Into<String>) -> Self {
        Self::with_status(key, CopyStatus::Copied)
    }

    pub fn skipped(key: impl Into<String>) -> Self {
        Self::with_status(key, CopyStatus::Skipped)
    }

    pub fn dry_run(key: impl Into<String>) -> Self {
        Self::with_status(key, CopyStatus::DryRun)
    }

    pub fn failed(key: impl Into<String>, error: impl ToString) -> Self {
        Self {
            key: key.into(),
            status: CopyStatus::Failed,
            error: Some(error.to_string()),
        }
    }

    fn with_status(key: impl Into<String>, status: CopyStatus) -> Self {
        Self {
            key: key.into(),
            status,
            error: None,
        }
    }

    /// Whether this attempt failed.
    pub fn is_failed(&self) -> bool {
        self.status == CopyStatus::Failed
    }
}
