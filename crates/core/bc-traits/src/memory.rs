//! In-memory object store.
//!
//! A [`MemoryBackend`] holds any number of buckets; a [`MemoryStore`] is a view
//! of one bucket implementing [`ObjectStore`]. Copies between stores of the same
//! backend behave like server-side copies. The backend also records call
//! counts and peak concurrency so tests can check how the engines drive it.

use async_trait::async_trait;
use bc_error::StorageError;
use bc_types::ObjectMeta;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::ObjectStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Op {
    Head,
    Copy,
}

/// Shared in-memory buckets with call instrumentation.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    buckets: Mutex<HashMap<String, HashMap<String, Vec<u8>>>>,
    failures: Mutex<HashMap<(Op, String, String), StorageError>>,
    head_calls: Mutex<HashMap<(String, String), usize>>,
    copy_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    latency: Duration,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create an empty backend where every request takes `latency`.
    ///
    /// Latency keeps requests in flight long enough for concurrency to show.
    pub fn with_latency(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            latency,
            ..Default::default()
        })
    }

    /// A store addressing `bucket` in this backend.
    pub fn store(self: &Arc<Self>, bucket: impl Into<String>) -> MemoryStore {
        MemoryStore {
            backend: Arc::clone(self),
            bucket: bucket.into(),
        }
    }

    /// Put an object, creating the bucket if needed.
    pub fn put_object(&self, bucket: &str, key: &str, body: impl Into<Vec<u8>>) {
        self.buckets
            .lock()
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), body.into());
    }

    /// Get an object's content.
    pub fn get_object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.buckets
            .lock()
            .get(bucket)
            .and_then(|objects| objects.get(key).cloned())
    }

    /// All keys in a bucket, sorted.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .buckets
            .lock()
            .get(bucket)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// Make every HeadObject for `bucket/key` fail with `error`.
    pub fn fail_head(&self, bucket: &str, key: &str, error: StorageError) {
        self.failures
            .lock()
            .insert((Op::Head, bucket.to_string(), key.to_string()), error);
    }

    /// Make every copy of `key` into `dest_bucket` fail with `error`.
    pub fn fail_copy(&self, dest_bucket: &str, key: &str, error: StorageError) {
        self.failures
            .lock()
            .insert((Op::Copy, dest_bucket.to_string(), key.to_string()), error);
    }

    /// Number of HeadObject calls made for `bucket/key`.
    pub fn head_count(&self, bucket: &str, key: &str) -> usize {
        self.head_calls
            .lock()
            .get(&(bucket.to_string(), key.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Total HeadObject calls made against `bucket`.
    pub fn total_head_calls(&self, bucket: &str) -> usize {
        self.head_calls
            .lock()
            .iter()
            .filter(|((b, _), _)| b == bucket)
            .map(|(_, count)| count)
            .sum()
    }

    /// Total copy calls made.
    pub fn copy_count(&self) -> usize {
        self.copy_calls.load(Ordering::SeqCst)
    }

    /// Highest number of requests that were in flight at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn injected_failure(&self, op: Op, bucket: &str, key: &str) -> Option<StorageError> {
        self.failures
            .lock()
            .get(&(op, bucket.to_string(), key.to_string()))
            .cloned()
    }

    async fn enter(&self) -> InFlightGuard<'_> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        InFlightGuard { backend: self }
    }
}

struct InFlightGuard<'a> {
    backend: &'a MemoryBackend,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.backend.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// One bucket of a [`MemoryBackend`].
#[derive(Debug, Clone)]
pub struct MemoryStore {
    backend: Arc<MemoryBackend>,
    bucket: String,
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn head_object(&self, key: &str) -> Result<Option<ObjectMeta>, StorageError> {
        *self
            .backend
            .head_calls
            .lock()
            .entry((self.bucket.clone(), key.to_string()))
            .or_insert(0) += 1;

        let _guard = self.backend.enter().await;

        if let Some(error) = self.backend.injected_failure(Op::Head, &self.bucket, key) {
            return Err(error);
        }

        Ok(self
            .backend
            .get_object(&self.bucket, key)
            .map(|body| ObjectMeta::with_size(body.len() as u64)))
    }

    async fn copy_object_from(&self, source_bucket: &str, key: &str) -> Result<(), StorageError> {
        self.backend.copy_calls.fetch_add(1, Ordering::SeqCst);

        let _guard = self.backend.enter().await;

        if let Some(error) = self.backend.injected_failure(Op::Copy, &self.bucket, key) {
            return Err(error);
        }

        let body = self
            .backend
            .get_object(source_bucket, key)
            .ok_or_else(|| StorageError::NotFound(format!("s3://{source_bucket}/{key}")))?;
        self.backend.put_object(&self.bucket, key, body);
        Ok(())
    }
}
