//! S3 client configuration and creation.

use aws_config::{BehaviorVersion, Region};
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use bc_error::{BcError, Result, StorageError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Where a client gets its AWS credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    /// The SDK default provider chain
    #[default]
    DefaultChain,
    /// A named profile from the shared config files
    Profile(String),
    /// Fixed keys (LocalStack and tests)
    Static {
        access_key: String,
        secret_key: String,
    },
}

impl CredentialSource {
    fn kind(&self) -> &'static str {
        match self {
            Self::DefaultChain => "default-chain",
            Self::Profile(_) => "profile",
            Self::Static { .. } => "static",
        }
    }
}

/// Settings for one region-bound S3 client.
///
/// Source and destination buckets may live in different regions, so a run
/// builds one of these per bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// Region the client signs requests for
    pub region: String,

    /// Endpoint override; enables path-style addressing
    pub endpoint: Option<String>,

    /// Credential source
    pub credentials: CredentialSource,

    /// Per-operation timeout in seconds, retries included
    pub timeout_secs: u64,

    /// Attempts per request under the SDK's standard retry mode
    pub max_attempts: u32,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            region: String::new(),
            endpoint: None,
            credentials: CredentialSource::DefaultChain,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl S3Config {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Default::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Use fixed keys instead of the default chain.
    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.credentials = CredentialSource::Static {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        };
        self
    }

    /// Use a named profile. Replaces any fixed keys.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.credentials = CredentialSource::Profile(profile.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Reject settings the SDK would accept but misbehave with.
    pub fn validate(&self) -> Result<()> {
        let problem = if self.region.trim().is_empty() {
            "S3 region is required"
        } else if self.max_attempts == 0 {
            "max_attempts must be at least 1"
        } else if self.timeout_secs == 0 {
            "timeout_secs must be at least 1"
        } else {
            return Ok(());
        };
        Err(BcError::Config(problem.to_string()))
    }
}

/// Build a client bound to `config.region`.
///
/// Transient failures are retried by the SDK's standard retry mode, up to
/// `max_attempts` per request.
pub async fn create_s3_client(config: &S3Config) -> Result<Client> {
    config.validate()?;

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .retry_config(RetryConfig::standard().with_max_attempts(config.max_attempts))
        .timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(Duration::from_secs(config.timeout_secs))
                .build(),
        );

    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    loader = match &config.credentials {
        CredentialSource::DefaultChain => loader,
        CredentialSource::Profile(profile) => loader.profile_name(profile),
        CredentialSource::Static {
            access_key,
            secret_key,
        } => loader.credentials_provider(Credentials::new(
            access_key,
            secret_key,
            None,
            None,
            "blindcopy-static",
        )),
    };

    let sdk_config = loader.load().await;
    verify_credentials(sdk_config.credentials_provider()).await?;

    // LocalStack-style endpoints don't resolve virtual-hosted bucket names
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.endpoint.is_some())
        .build();

    debug!(
        region = %config.region,
        endpoint = ?config.endpoint,
        credentials = config.credentials.kind(),
        max_attempts = config.max_attempts,
        timeout_secs = config.timeout_secs,
        "Created S3 client"
    );

    Ok(Client::from_conf(s3_config))
}

/// Resolve credentials once so a run without them stops before any request.
async fn verify_credentials(provider: Option<SharedCredentialsProvider>) -> Result<()> {
    let provider = provider.ok_or_else(|| {
        StorageError::Client("no AWS credentials provider is configured".to_string())
    })?;

    provider.provide_credentials().await.map_err(|e| {
        StorageError::Client(format!(
            "no usable AWS credentials: {}",
            DisplayErrorContext(&e)
        ))
    })?;

    Ok(())
}
