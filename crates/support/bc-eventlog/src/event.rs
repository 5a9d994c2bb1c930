//! Run events and their line formats.

use bc_types::{CopyResult, CopyStatus, DiscoveredKey};
use serde::{Deserialize, Serialize};

/// Line format of the event stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventFormat {
    /// `STATUS: key` lines (default)
    #[default]
    Text,

    /// JSON Lines - one JSON object per event
    Jsonl,
}

/// One line of the event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    /// A probe confirmed the key exists
    Discovered {
        key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<u64>,
    },

    /// A probe failed with something other than "not found"
    ProbeFailed { key: String, error: String },

    /// The key was copied
    Copied { key: String },

    /// The copy failed
    Failed { key: String, error: String },

    /// The destination already had the key
    Skipped { key: String },

    /// Dry run; the key would have been copied
    DryRun { key: String },

    /// Phase boundary or summary message
    Info { message: String },
}

impl RunEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self::Info {
            message: message.into(),
        }
    }

    /// Render the event as a single line without the trailing newline.
    pub fn render(&self, format: EventFormat) -> String {
        match format {
            EventFormat::Text => self.to_string(),
            // Serializing a plain enum of strings cannot fail; fall back to text if it ever does.
            EventFormat::Jsonl => serde_json::to_string(self).unwrap_or_else(|_| self.to_string()),
        }
    }
}

impl std::fmt::Display for RunEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discovered { key, .. } => write!(f, "DISCOVERED: {key}"),
            Self::ProbeFailed { key, error } => write!(f, "PROBE_FAILED: {key} - {error}"),
            Self::Copied { key } => write!(f, "COPIED: {key}"),
            Self::Failed { key, error } => write!(f, "FAILED: {key} - {error}"),
            Self::Skipped { key } => write!(f, "SKIPPED: {key}"),
            Self::DryRun { key } => write!(f, "DRY_RUN: {key}"),
            Self::Info { message } => write!(f, "INFO: {message}"),
        }
    }
}

impl From<&DiscoveredKey> for RunEvent {
    fn from(discovered: &DiscoveredKey) -> Self {
        Self::Discovered {
            key: discovered.key.clone(),
            size: discovered.meta.size,
        }
    }
}

impl From<&CopyResult> for RunEvent {
    fn from(result: &CopyResult) -> Self {
        let key = result.key.clone();
        match result.status {
            CopyStatus::Copied => Self::Copied { key },
            CopyStatus::Skipped => Self::Skipped { key },
            CopyStatus::DryRun => Self::DryRun { key },
            CopyStatus::Failed => Self::Failed {
                key,
                error: result.error.clone().unwrap_or_default(),
            },
        }
    }
}
