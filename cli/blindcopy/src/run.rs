//! Main execution logic for blindcopy CLI.

use anyhow::{Context, Result};
use bc_discoverer::{Discoverer, DiscoveryConfig, DiscoveryStats};
use bc_eventlog::EventLog;
use bc_replicator::{ReplicationStats, Replicator, ReplicatorConfig};
use bc_s3::{S3Config, S3Store};
use bc_traits::ObjectStore;
use bc_types::{BucketLocation, ReplicationConfig, RunArtifact, Vocabulary, parse_list};
use tracing::{info, warn};

use crate::args::Cli;

/// What a completed run did.
#[derive(Debug)]
pub struct RunSummary {
    /// Discovery statistics, absent when a saved object list was reused
    pub discovery: Option<DiscoveryStats>,

    /// Number of keys handed to replication
    pub keys: usize,

    /// Replication statistics
    pub replication: ReplicationStats,
}

impl RunSummary {
    /// Whether the copy failure rate exceeds `threshold`.
    pub fn exceeds_failure_rate(&self, threshold: Option<f64>) -> bool {
        threshold.is_some_and(|max| self.replication.failure_rate() > max)
    }
}

/// Build and validate the run configuration from CLI arguments.
pub fn build_config(args: &Cli) -> Result<ReplicationConfig> {
    let vocabulary = Vocabulary::new()
        .with_key_prefixes(parse_list(&args.key_prefixes))
        .with_folder_patterns(parse_list(&args.folder_patterns))
        .with_file_names(parse_list(&args.file_names))
        .with_file_extensions(parse_list(&args.file_extensions));

    let mut config = ReplicationConfig::new(
        BucketLocation::new(&args.source_bucket, &args.source_region),
        BucketLocation::new(&args.dest_bucket, &args.dest_region),
    )
    .with_vocabulary(vocabulary)
    .with_builtin_vocabulary(args.builtin_vocabulary)
    .with_max_workers(args.max_workers)
    .with_object_list_file(&args.object_list_file)
    .with_reuse_object_list(args.reuse_object_list)
    .with_dry_run(args.dry_run)
    .with_skip_existing(args.skip_existing)
    .with_max_candidates(args.max_candidates)
    .with_progress_interval(args.progress_interval);

    if let Some(rate) = args.max_failure_rate {
        config = config.with_max_failure_rate(rate);
    }

    config.validate()?;
    Ok(config)
}

/// Build the S3 client configuration for one region.
fn s3_config(args: &Cli, region: &str) -> S3Config {
    let mut config = S3Config::new(region)
        .with_timeout(args.timeout_secs)
        .with_max_attempts(args.max_attempts);

    if let Some(endpoint) = &args.s3_endpoint {
        config = config.with_endpoint(endpoint);
    }

    if let Some(profile) = &args.profile {
        config = config.with_profile(profile);
    }

    config
}

/// Execute a run with the provided arguments.
pub async fn execute(args: Cli) -> Result<RunSummary> {
    let config = build_config(&args)?;

    info!(
        source = %config.source,
        destination = %config.destination,
        max_workers = config.max_workers,
        "Starting blindcopy"
    );

    let source = S3Store::connect(&s3_config(&args, &config.source.region), &config.source.bucket)
        .await
        .context("Failed to create source S3 client")?;
    let destination = S3Store::connect(
        &s3_config(&args, &config.destination.region),
        &config.destination.bucket,
    )
    .await
    .context("Failed to create destination S3 client")?;

    let (events, writer) = EventLog::stdout(args.event_format.into());

    let summary = run_pipeline(source, destination, &config, events).await;

    if let Err(e) = writer.finish().await {
        warn!(error = %e, "Event stream was not fully written");
    }

    summary
}

/// Run discovery (unless a saved list is reused) followed by replication.
///
/// Takes ownership of `events` so the writer can finish once the run is done.
pub async fn run_pipeline<S, D>(
    source: S,
    destination: D,
    config: &ReplicationConfig,
    events: EventLog,
) -> Result<RunSummary>
where
    S: ObjectStore,
    D: ObjectStore,
{
    let artifact = RunArtifact::new(&config.object_list_file);

    let discovery = if config.reuse_object_list && artifact.exists() {
        info!(path = %artifact.path().display(), "Reusing saved object list; skipping discovery");
        events.info(format!(
            "Reusing object list {}; discovery skipped",
            artifact.path().display()
        ));
        None
    } else {
        if config.reuse_object_list {
            info!(
                path = %artifact.path().display(),
                "Object list not found; running discovery"
            );
        }
        let discoverer = Discoverer::new(source, DiscoveryConfig::from(config), events.clone());
        let outcome = discoverer
            .run(&artifact)
            .await
            .context("Discovery could not save the object list")?;
        Some(outcome.stats)
    };

    let keys = artifact
        .read()
        .context("Failed to read the object list")?;

    let replicator = Replicator::new(
        destination,
        &config.source.bucket,
        ReplicatorConfig::from(config),
        events,
    );
    let outcome = replicator.replicate(keys.iter().cloned()).await;

    Ok(RunSummary {
        discovery,
        keys: keys.len(),
        replication: outcome.stats,
    })
}
