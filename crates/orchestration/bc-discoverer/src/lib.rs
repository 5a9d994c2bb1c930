//! bc-discoverer - Key discovery for buckets that cannot be listed.
//!
//! Generates candidate keys from vocabularies, probes each one with a
//! metadata-only request, and persists the confirmed keys.
//!
//! # Example
//!
//! ```ignore
//! use bc_discoverer::{Discoverer, DiscoveryConfig};
//! use bc_eventlog::{EventFormat, EventLog};
//! use bc_s3::{S3Config, S3Store};
//! use bc_types::{RunArtifact, Vocabulary};
//!
//! let store = S3Store::connect(&S3Config::new("us-east-1"), "source-bucket").await?;
//! let (events, writer) = EventLog::stdout(EventFormat::Text);
//!
//! let config = DiscoveryConfig::new().with_vocabulary(
//!     Vocabulary::new()
//!         .with_key_prefixes(["backup"])
//!         .with_folder_patterns(["data"])
//!         .with_file_extensions(["csv"]),
//! );
//!
//! let discoverer = Discoverer::new(store, config, events);
//! let outcome = discoverer.run(&RunArtifact::new("discovered_objects.txt")).await?;
//! eprintln!("Discovered {} objects", outcome.stats.found);
//! ```

pub mod builtin;
pub mod candidate;
pub mod config;
pub mod discoverer;
pub mod stats;

pub use builtin::builtin_vocabulary;
pub use candidate::{Axis, CandidateSpace, TEMPLATES, Template, generate_candidates};
pub use config::DiscoveryConfig;
pub use discoverer::{Discoverer, DiscoveryOutcome, ProbeOutcome};
pub use stats::DiscoveryStats;
