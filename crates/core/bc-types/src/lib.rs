//! Core types for blindcopy.
//!
//! This crate provides the foundational types shared by both phases:
//! - [`DiscoveredKey`] / [`ObjectMeta`] - An object confirmed to exist in the source
//! - [`CopyResult`] / [`CopyStatus`] - Outcome of one replication attempt
//! - [`Vocabulary`] - Word lists that candidate keys are composed from
//! - [`ReplicationConfig`] - Validated run configuration
//! - [`RunArtifact`] - The persisted discovered-keys list

pub mod artifact;
pub mod config;
pub mod key;
pub mod result;
pub mod vocabulary;

pub use artifact::*;
pub use config::*;
pub use key::*;
pub use result::*;
pub use vocabulary::*;
