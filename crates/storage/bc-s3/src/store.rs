//! S3 object store.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use bc_error::{Result, StorageError};
use bc_traits::ObjectStore;
use bc_types::ObjectMeta;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, trace};

use crate::{S3Config, create_s3_client, map_sdk_error};

/// Bytes escaped in a copy source key: everything except RFC 3986 unreserved
/// characters and the `/` path separator.
const COPY_SOURCE_KEY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// The `x-amz-copy-source` value for `bucket/key`.
///
/// S3 URL-decodes this header, so the key is percent-encoded to name the
/// exact object that HeadObject confirmed.
pub fn copy_source(bucket: &str, key: &str) -> String {
    format!("{bucket}/{}", utf8_percent_encode(key, COPY_SOURCE_KEY))
}

/// [`ObjectStore`] over one S3 bucket.
///
/// The client is bound to the bucket's region and reused for every request.
/// Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Wrap an existing client.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from `config` and bind it to `bucket`.
    pub async fn connect(config: &S3Config, bucket: impl Into<String>) -> Result<Self> {
        let client = create_s3_client(config).await?;
        Ok(Self::new(client, bucket))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn head_object(
        &self,
        key: &str,
    ) -> std::result::Result<Option<ObjectMeta>, StorageError> {
        trace!(bucket = %self.bucket, key, "HeadObject");

        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => Ok(Some(ObjectMeta {
                size: output.content_length().and_then(|len| u64::try_from(len).ok()),
                etag: output.e_tag().map(str::to_string),
            })),
            Err(e) => match map_sdk_error(&e, key) {
                StorageError::NotFound(_) => Ok(None),
                other => Err(other),
            },
        }
    }

    async fn copy_object_from(
        &self,
        source_bucket: &str,
        key: &str,
    ) -> std::result::Result<(), StorageError> {
        self.client
            .copy_object()
            .copy_source(copy_source(source_bucket, key))
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error(&e, key))?;

        debug!(source_bucket, bucket = %self.bucket, key, "CopyObject succeeded");
        Ok(())
    }
}
