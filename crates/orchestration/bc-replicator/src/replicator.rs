//! Main Replicator implementation.

use bc_dispatch::dispatch;
use bc_error::classify_storage_error;
use bc_eventlog::{EventLog, RunEvent};
use bc_traits::ObjectStore;
use bc_types::CopyResult;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

use crate::config::ReplicatorConfig;
use crate::stats::ReplicationStats;

/// Per-key results of a replication run, with its statistics.
#[derive(Debug, Clone)]
pub struct ReplicationOutcome {
    /// One result per unique input key, in input order
    pub results: Vec<CopyResult>,

    /// Run statistics
    pub stats: ReplicationStats,
}

/// Server-side copies keys from a source bucket into a destination store.
///
/// Copies are issued by the destination store's client, addressing the source
/// object by bucket and key. A failed key never affects the others.
pub struct Replicator<S: ObjectStore> {
    destination: S,
    source_bucket: String,
    config: ReplicatorConfig,
    events: EventLog,
}

impl<S: ObjectStore> Replicator<S> {
    /// Create a new Replicator.
    ///
    /// # Arguments
    ///
    /// * `destination` - Store bound to the destination bucket and region
    /// * `source_bucket` - Bucket the keys are copied from
    /// * `config` - Concurrency and optional behaviours
    /// * `events` - Where per-key result lines go
    pub fn new(
        destination: S,
        source_bucket: impl Into<String>,
        config: ReplicatorConfig,
        events: EventLog,
    ) -> Self {
        Self {
            destination,
            source_bucket: source_bucket.into(),
            config,
            events,
        }
    }

    /// Attempt every key once, at most `max_workers` at a time.
    ///
    /// Repeated keys in the input are attempted only at their first occurrence.
    pub async fn replicate<I, K>(&self, keys: I) -> ReplicationOutcome
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut stats = ReplicationStats::new();

        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        let mut repeated = 0usize;
        for key in keys {
            let key: String = key.into();
            if seen.insert(key.clone()) {
                unique.push(key);
            } else {
                repeated += 1;
            }
        }
        if repeated > 0 {
            warn!(repeated, "Input repeats some keys; each is copied once");
        }

        let total = unique.len();
        info!(
            source_bucket = %self.source_bucket,
            destination_bucket = %self.destination.bucket(),
            objects = total,
            max_workers = self.config.max_workers,
            dry_run = self.config.dry_run,
            skip_existing = self.config.skip_existing,
            "Starting replication"
        );
        self.events.info(format!(
            "Replicating {total} objects from s3://{} to s3://{}",
            self.source_bucket,
            self.destination.bucket()
        ));

        let processed = AtomicUsize::new(0);

        let results = dispatch(unique, self.config.max_workers, |key| {
            let processed = &processed;
            async move {
                let result = self.copy_one(&key).await;
                let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
                self.report_progress(done, total);
                result
            }
        })
        .await;

        for result in &results {
            stats.record(result);
        }
        stats.complete();

        info!(
            copied = stats.copied,
            failed = stats.failed,
            skipped = stats.skipped,
            dry_run = stats.dry_run,
            "Replication completed"
        );
        self.events.info(format!(
            "Replication complete: {} copied, {} failed, {} skipped, {} dry-run",
            stats.copied, stats.failed, stats.skipped, stats.dry_run
        ));

        ReplicationOutcome { results, stats }
    }

    /// Replicate one key and report the result on the event log.
    pub async fn copy_one(&self, key: &str) -> CopyResult {
        let result = self.attempt(key).await;
        self.events.emit(RunEvent::from(&result));
        result
    }

    async fn attempt(&self, key: &str) -> CopyResult {
        if self.config.skip_existing {
            match self.destination.head_object(key).await {
                Ok(Some(_)) => {
                    debug!(key, "Already in destination; skipping");
                    return CopyResult::skipped(key);
                }
                Ok(None) => {}
                Err(e) => {
                    let category = classify_storage_error(&e);
                    warn!(key, error = %e, category = %category, "Destination check failed");
                    return CopyResult::failed(key, format!("destination check failed: {e}"));
                }
            }
        }

        if self.config.dry_run {
            debug!(key, "Dry run; not copying");
            return CopyResult::dry_run(key);
        }

        match self
            .destination
            .copy_object_from(&self.source_bucket, key)
            .await
        {
            Ok(()) => {
                debug!(key, "Copied");
                CopyResult::copied(key)
            }
            Err(e) => {
                let category = classify_storage_error(&e);
                warn!(key, error = %e, category = %category, "Copy failed");
                CopyResult::failed(key, e)
            }
        }
    }

    fn report_progress(&self, done: usize, total: usize) {
        let interval = self.config.progress_interval;
        if interval > 0 && done % interval == 0 {
            info!(processed = done, total, "Processed {done}/{total} objects");
        }
    }
}
