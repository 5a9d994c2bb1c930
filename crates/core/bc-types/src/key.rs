//! Discovered object keys.

use serde::{Deserialize, Serialize};

/// Metadata returned by an existence probe.
///
/// Only what a metadata-only request yields for free; nothing is downloaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Object size in bytes, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Entity tag, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl ObjectMeta {
    /// Creates metadata with a known size.
    pub fn with_size(size: u64) -> Self {
        Self {
            size: Some(size),
            etag: None,
        }
    }

    /// Sets the entity tag.
    pub fn etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }
}

/// A candidate key confirmed to exist in the source bucket at probe time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredKey {
    /// The object key
    pub key: String,

    /// Metadata from the probe
    #[serde(flatten)]
    pub meta: ObjectMeta,
}

impl DiscoveredKey {
    /// Creates a discovered key without metadata.
    ///
    /// Keys loaded back from a run artifact carry no metadata.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            meta: ObjectMeta::default(),
        }
    }

    /// Creates a discovered key from a probe response.
    pub fn with_meta(key: impl Into<String>, meta: ObjectMeta) -> Self {
        Self {
            key: key.into(),
            meta,
        }
    }
}

impl AsRef<str> for DiscoveredKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}
