//! Main Discoverer implementation.

use bc_dispatch::dispatch;
use bc_error::{Result, StorageError, classify_storage_error};
use bc_eventlog::{EventLog, RunEvent};
use bc_traits::ObjectStore;
use bc_types::{DiscoveredKey, ObjectMeta, RunArtifact};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, trace, warn};

use crate::candidate::generate_candidates;
use crate::config::DiscoveryConfig;
use crate::stats::DiscoveryStats;

/// Result of probing one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The object exists
    Found(ObjectMeta),
    /// The object does not exist
    NotFound,
    /// The probe failed for another reason
    Failed(StorageError),
}

/// Keys confirmed by a discovery run, with its statistics.
#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    /// Confirmed keys in candidate generation order
    pub keys: Vec<DiscoveredKey>,

    /// Run statistics
    pub stats: DiscoveryStats,
}

impl DiscoveryOutcome {
    /// The confirmed key strings, in order.
    pub fn key_names(&self) -> Vec<&str> {
        self.keys.iter().map(|k| k.key.as_str()).collect()
    }
}

/// Finds objects in a bucket that cannot be listed by probing guessed keys.
///
/// The discoverer only issues metadata requests; it never writes to the store.
pub struct Discoverer<S: ObjectStore> {
    store: S,
    config: DiscoveryConfig,
    events: EventLog,
}

impl<S: ObjectStore> Discoverer<S> {
    /// Create a new Discoverer.
    ///
    /// # Arguments
    ///
    /// * `store` - The source bucket to probe
    /// * `config` - Vocabularies and limits
    /// * `events` - Where `DISCOVERED` / `PROBE_FAILED` lines go
    pub fn new(store: S, config: DiscoveryConfig, events: EventLog) -> Self {
        Self {
            store,
            config,
            events,
        }
    }

    /// Run discovery and persist the confirmed keys to `artifact`.
    ///
    /// Any previous artifact is replaced. Only an artifact write failure is an
    /// error; per-key probe failures are recorded in the stats.
    pub async fn run(&self, artifact: &RunArtifact) -> Result<DiscoveryOutcome> {
        let outcome = self.discover().await;

        let written = artifact.write(outcome.key_names())?;
        info!(
            path = %artifact.path().display(),
            keys = written,
            "Saved discovered object list"
        );
        self.events.info(format!(
            "Saved {written} discovered keys to {}",
            artifact.path().display()
        ));

        Ok(outcome)
    }

    /// Generate candidates, probe each one once, and collect the confirmed keys.
    pub async fn discover(&self) -> DiscoveryOutcome {
        let mut stats = DiscoveryStats::new();
        let bucket = self.store.bucket().to_string();

        let mut space = generate_candidates(&self.config.effective_vocabulary());
        stats.candidates_generated = space.generated;
        stats.duplicates_removed = space.duplicates;

        if self.config.max_candidates > 0 {
            let dropped = space.truncate(self.config.max_candidates);
            if dropped > 0 {
                warn!(
                    max_candidates = self.config.max_candidates,
                    dropped,
                    "Candidate space exceeds the limit; probing only the first candidates"
                );
                stats.candidates_truncated = dropped;
            }
        }

        let total = space.len();
        if space.is_empty() {
            warn!("No candidate keys generated; check the vocabulary lists");
        }

        info!(
            bucket = %bucket,
            candidates = total,
            generated = space.generated,
            duplicates = space.duplicates,
            max_workers = self.config.max_workers,
            "Starting discovery"
        );
        self.events
            .info(format!("Probing {total} candidate keys in s3://{bucket}"));

        let probed = AtomicUsize::new(0);
        let found = AtomicUsize::new(0);

        let outcomes = dispatch(space.keys, self.config.max_workers, |key| {
            let probed = &probed;
            let found = &found;
            async move {
                let outcome = self.probe(&key).await;
                if matches!(outcome, ProbeOutcome::Found(_)) {
                    found.fetch_add(1, Ordering::Relaxed);
                }
                let done = probed.fetch_add(1, Ordering::Relaxed) + 1;
                self.report_progress(done, total, found.load(Ordering::Relaxed));
                (key, outcome)
            }
        })
        .await;

        let mut keys = Vec::new();
        for (key, outcome) in outcomes {
            match outcome {
                ProbeOutcome::Found(meta) => {
                    stats.record_found(meta.size);
                    keys.push(DiscoveredKey::with_meta(key, meta));
                }
                ProbeOutcome::NotFound => stats.record_not_found(),
                ProbeOutcome::Failed(e) => stats.record_error(format!("{key}: {e}")),
            }
        }

        stats.complete();

        info!(
            bucket = %bucket,
            probed = stats.candidates_probed,
            found = stats.found,
            not_found = stats.not_found,
            errors = stats.error_count(),
            bytes = stats.bytes_found,
            "Discovery completed"
        );
        self.events.info(format!(
            "Discovery complete: found {} of {} candidates ({} probe errors)",
            stats.found,
            stats.candidates_probed,
            stats.error_count()
        ));

        DiscoveryOutcome { keys, stats }
    }

    /// Probe one candidate and report it on the event log.
    pub async fn probe(&self, key: &str) -> ProbeOutcome {
        match self.store.head_object(key).await {
            Ok(Some(meta)) => {
                let discovered = DiscoveredKey::with_meta(key, meta);
                debug!(key, size = ?discovered.meta.size, "Discovered object");
                self.events.emit(RunEvent::from(&discovered));
                ProbeOutcome::Found(discovered.meta)
            }
            Ok(None) => {
                trace!(key, "Not found");
                ProbeOutcome::NotFound
            }
            Err(e) => {
                let category = classify_storage_error(&e);
                warn!(key, error = %e, category = %category, "Probe failed");
                self.events.emit(RunEvent::ProbeFailed {
                    key: key.to_string(),
                    error: e.to_string(),
                });
                ProbeOutcome::Failed(e)
            }
        }
    }

    fn report_progress(&self, done: usize, total: usize, found: usize) {
        let interval = self.config.progress_interval;
        if interval > 0 && done % interval == 0 {
            info!(
                probed = done,
                total,
                found,
                "Probed {done}/{total} candidates, found {found}"
            );
        }
    }
}
