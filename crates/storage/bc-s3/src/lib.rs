//! S3 backend for blindcopy.
//!
//! - [`S3Config`] / [`create_s3_client`] - Region-bound client construction
//! - [`S3Store`] - [`ObjectStore`](bc_traits::ObjectStore) over HeadObject and CopyObject
//! - [`copy_source`] - Percent-encoded `x-amz-copy-source` values
//! - [`map_sdk_error`] - SDK error to [`StorageError`](bc_error::StorageError) mapping

mod client;
mod error;
mod store;

pub use client::{CredentialSource, S3Config, create_s3_client};
pub use error::{classify_response, map_sdk_error};
pub use store::{S3Store, copy_source};
