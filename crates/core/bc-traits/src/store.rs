//! Object store trait.

use async_trait::async_trait;
use bc_error::StorageError;
use bc_types::ObjectMeta;

/// An object store bound to a single bucket.
///
/// Implementations must be cheap to share across tasks; both engines call
/// them concurrently from many workers.
///
/// # Implementations
///
/// - S3 store: HeadObject / CopyObject against a region-bound client
/// - Memory store: in-process buckets for tests
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// The bucket this store addresses.
    fn bucket(&self) -> &str;

    /// Checks whether `key` exists without transferring its content.
    ///
    /// # Returns
    ///
    /// `Ok(Some(meta))` when the object exists, `Ok(None)` when it does not.
    /// Any other failure (access denied, throttling, network) is an error.
    async fn head_object(&self, key: &str) -> Result<Option<ObjectMeta>, StorageError>;

    /// Server-side copies `source_bucket/key` into this store's bucket under the same key.
    ///
    /// Copying a key that already exists with identical content is a safe overwrite.
    async fn copy_object_from(&self, source_bucket: &str, key: &str) -> Result<(), StorageError>;
}
