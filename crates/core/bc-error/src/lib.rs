//! Error types and classification for blindcopy.
//!
//! This crate provides:
//! - [`BcError`] - Top-level error enum for setup and phase errors
//! - Domain-specific errors ([`StorageError`], [`ArtifactError`])
//! - [`ErrorCategory`] for telling transient per-key failures from permanent ones
//!
//! Only setup-level errors are meant to propagate out of a run. Per-key storage
//! errors are caught by the engines, classified, and reported as results.

use thiserror::Error;

/// Top-level error type for blindcopy.
#[derive(Error, Debug)]
pub enum BcError {
    /// Object storage errors (probe, copy, client construction)
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Run artifact errors (reading or writing the discovered-keys file)
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors returned by an object store for a single request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The object (or bucket) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller lacks permission for the request
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// The service asked the caller to slow down
    #[error("Throttled: {0}")]
    Throttled(String),

    /// Any other error response from the service
    #[error("Service error {code}: {message}")]
    Service { code: String, message: String },

    /// The request never produced a service response (network, timeout, dispatch)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The client could not be constructed
    #[error("Client construction failed: {0}")]
    Client(String),
}

impl StorageError {
    /// Whether this error means the object simply is not there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Errors reading or writing the run artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// The artifact could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The artifact could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A key cannot be stored one-per-line
    #[error("Invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },
}

/// Error classification for per-key failures.
///
/// Nothing is retried within a run; the category is reported alongside the
/// failure so an operator knows whether re-running is likely to help.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transient error - a later re-run will probably succeed
    ///
    /// Examples: throttling, network timeout, 5xx responses
    Transient,

    /// Permanent error - a re-run will fail the same way
    ///
    /// Examples: access denied, key vanished, bad configuration
    Permanent,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transient => write!(f, "transient"),
            Self::Permanent => write!(f, "permanent"),
        }
    }
}

/// Classifies a storage error.
pub fn classify_storage_error(error: &StorageError) -> ErrorCategory {
    match error {
        StorageError::NotFound(_) => ErrorCategory::Permanent,
        StorageError::AccessDenied(_) => ErrorCategory::Permanent,
        StorageError::Throttled(_) => ErrorCategory::Transient,
        StorageError::Service { code, message } => {
            classify_message(&format!("{code} {message}"))
        }
        StorageError::Transport(_) => ErrorCategory::Transient,
        StorageError::Client(_) => ErrorCategory::Permanent,
    }
}

/// Classifies free-form error text by well-known S3 codes and HTTP statuses.
///
/// Unknown errors count as transient.
pub fn classify_message(message: &str) -> ErrorCategory {
    let lower = message.to_lowercase();

    if lower.contains("slowdown")
        || lower.contains("toomanyrequests")
        || lower.contains("throttl")
        || lower.contains("service unavailable")
        || lower.contains("internalerror")
        || lower.contains("500")
        || lower.contains("502")
        || lower.contains("503")
        || lower.contains("504")
        || lower.contains("timeout")
        || lower.contains("connection reset")
        || lower.contains("connection refused")
    {
        return ErrorCategory::Transient;
    }

    if lower.contains("nosuchkey")
        || lower.contains("nosuchbucket")
        || lower.contains("accessdenied")
        || lower.contains("invalidrequest")
        || lower.contains("403")
        || lower.contains("404")
        || lower.contains("400")
    {
        return ErrorCategory::Permanent;
    }

    ErrorCategory::Transient
}

/// Result type alias using BcError.
pub type Result<T> = std::result::Result<T, BcError>;
