//! LocalStack test context and utilities.

use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::config::{Credentials, Region};
use bc_s3::{S3Config, S3Store};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const ACCESS_KEY: &str = "test";
const SECRET_KEY: &str = "test";

/// A bucket name no other test in this run uses.
pub fn unique_bucket(prefix: &str) -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{prefix}-{millis}-{n}")
}

/// LocalStack test context providing an S3 client for fixtures.
pub struct LocalStackTestContext {
    pub s3: S3Client,
    pub endpoint: String,
    pub region: String,
}

impl LocalStackTestContext {
    /// Create a new LocalStack test context.
    ///
    /// Uses the `LOCALSTACK_ENDPOINT` environment variable if set,
    /// otherwise defaults to `http://localhost:4566`.
    pub async fn new() -> Self {
        let endpoint = std::env::var("LOCALSTACK_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4566".to_string());
        let region = "us-east-1".to_string();

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .endpoint_url(&endpoint)
            .credentials_provider(Credentials::new(
                ACCESS_KEY, SECRET_KEY, None, None, "localstack",
            ))
            .load()
            .await;
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();

        Self {
            s3: S3Client::from_conf(s3_config),
            endpoint,
            region,
        }
    }

    /// Check if LocalStack is available and healthy.
    pub async fn is_available(&self) -> bool {
        self.s3.list_buckets().send().await.is_ok()
    }

    /// Client configuration pointing blindcopy at LocalStack.
    pub fn s3_config(&self) -> S3Config {
        S3Config::new(&self.region)
            .with_endpoint(&self.endpoint)
            .with_credentials(ACCESS_KEY, SECRET_KEY)
            .with_timeout(10)
    }

    /// An `S3Store` for `bucket` built through blindcopy's own client setup.
    pub async fn store(&self, bucket: &str) -> S3Store {
        S3Store::connect(&self.s3_config(), bucket)
            .await
            .expect("client construction")
    }

    /// Create an S3 bucket for testing.
    pub async fn create_bucket(&self, name: &str) -> Result<(), aws_sdk_s3::Error> {
        self.s3.create_bucket().bucket(name).send().await?;
        Ok(())
    }

    /// Upload an object.
    pub async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: &str,
    ) -> Result<(), aws_sdk_s3::Error> {
        self.s3
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body.as_bytes().to_vec().into())
            .send()
            .await?;
        Ok(())
    }

    /// Download an object's content, or `None` if it does not exist.
    pub async fn get_object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        let output = self.s3.get_object().bucket(bucket).key(key).send().await.ok()?;
        let bytes = output.body.collect().await.ok()?;
        Some(bytes.into_bytes().to_vec())
    }

    /// List every key in a bucket.
    pub async fn list_keys(&self, bucket: &str) -> Result<Vec<String>, aws_sdk_s3::Error> {
        let result = self.s3.list_objects_v2().bucket(bucket).send().await?;
        let mut keys: Vec<String> = result
            .contents()
            .iter()
            .filter_map(|obj| obj.key().map(str::to_string))
            .collect();
        keys.sort();
        Ok(keys)
    }
}
