//! End-to-end discovery and replication tests using LocalStack.

use crate::common::{LocalStackTestContext, unique_bucket};
use bc_discoverer::{Discoverer, DiscoveryConfig};
use bc_eventlog::{EventFormat, EventLog, MemorySink};
use bc_replicator::{Replicator, ReplicatorConfig};
use bc_types::{CopyStatus, RunArtifact, Vocabulary};

fn scenario_vocabulary() -> Vocabulary {
    Vocabulary::new()
        .with_key_prefixes(["backup"])
        .with_folder_patterns(["data"])
        .with_file_extensions(["csv"])
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_discover_and_replicate() {
    let ctx = LocalStackTestContext::new().await;
    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let source = unique_bucket("bc-e2e-src");
    let dest = unique_bucket("bc-e2e-dst");
    ctx.create_bucket(&source).await.unwrap();
    ctx.create_bucket(&dest).await.unwrap();
    ctx.put_object(&source, "backup/data.csv", "1,2,3\n").await.unwrap();
    ctx.put_object(&source, "data/backup.csv", "4,5,6\n").await.unwrap();
    ctx.put_object(&source, "unguessable/name.bin", "x").await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let artifact = RunArtifact::new(dir.path().join("discovered_objects.txt"));
    let sink = MemorySink::new();
    let (events, writer) = EventLog::spawn(sink.clone(), EventFormat::Text);

    let discoverer = Discoverer::new(
        ctx.store(&source).await,
        DiscoveryConfig::new()
            .with_vocabulary(scenario_vocabulary())
            .with_max_workers(4),
        events.clone(),
    );
    let discovery = discoverer.run(&artifact).await.unwrap();
    assert_eq!(discovery.stats.found, 2);
    assert!(!discovery.stats.has_errors());

    let keys = artifact.read().unwrap();
    assert_eq!(keys, vec!["backup/data.csv", "data/backup.csv"]);

    let replicator = Replicator::new(
        ctx.store(&dest).await,
        &source,
        ReplicatorConfig::new().with_max_workers(4),
        events,
    );
    let outcome = replicator.replicate(keys).await;
    drop(discoverer);
    drop(replicator);
    writer.finish().await.unwrap();

    assert!(outcome.results.iter().all(|r| r.status == CopyStatus::Copied));
    assert_eq!(sink.lines_starting_with("COPIED:").len(), 2);
    assert!(sink.lines_starting_with("FAILED:").is_empty());
    assert_eq!(
        ctx.list_keys(&dest).await.unwrap(),
        vec!["backup/data.csv", "data/backup.csv"]
    );
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_rerun_copies_again_with_identical_content() {
    let ctx = LocalStackTestContext::new().await;
    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let source = unique_bucket("bc-idem-src");
    let dest = unique_bucket("bc-idem-dst");
    ctx.create_bucket(&source).await.unwrap();
    ctx.create_bucket(&dest).await.unwrap();
    ctx.put_object(&source, "k.csv", "same bytes").await.unwrap();

    for _ in 0..2 {
        let (events, _writer) = EventLog::spawn(MemorySink::new(), EventFormat::Text);
        let replicator =
            Replicator::new(ctx.store(&dest).await, &source, ReplicatorConfig::new(), events);
        let outcome = replicator.replicate(["k.csv"]).await;
        assert_eq!(outcome.results[0].status, CopyStatus::Copied);
    }

    assert_eq!(
        ctx.get_object(&dest, "k.csv").await,
        Some(b"same bytes".to_vec())
    );
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_missing_key_fails_without_affecting_others() {
    let ctx = LocalStackTestContext::new().await;
    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let source = unique_bucket("bc-part-src");
    let dest = unique_bucket("bc-part-dst");
    ctx.create_bucket(&source).await.unwrap();
    ctx.create_bucket(&dest).await.unwrap();
    ctx.put_object(&source, "k1", "one").await.unwrap();
    ctx.put_object(&source, "k3", "three").await.unwrap();

    let (events, _writer) = EventLog::spawn(MemorySink::new(), EventFormat::Text);
    let replicator =
        Replicator::new(ctx.store(&dest).await, &source, ReplicatorConfig::new(), events);
    let outcome = replicator.replicate(["k1", "k2", "k3"]).await;

    let statuses: Vec<CopyStatus> = outcome.results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![CopyStatus::Copied, CopyStatus::Failed, CopyStatus::Copied]
    );
    assert_eq!(ctx.list_keys(&dest).await.unwrap(), vec!["k1", "k3"]);
}
