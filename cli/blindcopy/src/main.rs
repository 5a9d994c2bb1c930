//! blindcopy CLI
//!
//! Discovers objects in a bucket that cannot be listed and copies them to
//! another bucket.

use bc_cli_common::{format_bytes, format_number, format_rate, format_seconds, init_logging};
use clap::Parser;

mod args;
mod run;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Logs go to stderr; stdout carries the per-key event lines
    init_logging(args.log_level)?;

    let max_failure_rate = args.max_failure_rate;
    let summary = run::execute(args).await?;

    eprintln!();
    if let Some(discovery) = &summary.discovery {
        eprintln!("Discovery:");
        eprintln!(
            "  Candidates:   {} ({} duplicates removed)",
            format_number(discovery.candidates_generated as u64),
            format_number(discovery.duplicates_removed as u64)
        );
        eprintln!("  Probed:       {}", format_number(discovery.candidates_probed as u64));
        eprintln!("  Discovered:   {}", format_number(discovery.found as u64));
        eprintln!("  Bytes found:  {}", format_bytes(discovery.bytes_found));
        eprintln!("  Probe errors: {}", discovery.error_count());
        if let Some(duration) = discovery.duration() {
            eprintln!("  Duration:     {}", format_seconds(duration.num_milliseconds()));
        }
        if let Some(rate) = discovery.probes_per_second() {
            eprintln!("  Throughput:   {}", format_rate(rate, "probes"));
        }
    } else {
        eprintln!("Discovery: skipped (reused object list)");
    }

    let replication = &summary.replication;
    eprintln!("Replication:");
    eprintln!("  Keys:         {}", format_number(summary.keys as u64));
    eprintln!("  Copied:       {}", format_number(replication.copied as u64));
    eprintln!("  Failed:       {}", format_number(replication.failed as u64));
    if replication.skipped > 0 {
        eprintln!("  Skipped:      {}", format_number(replication.skipped as u64));
    }
    if replication.dry_run > 0 {
        eprintln!("  Dry run:      {}", format_number(replication.dry_run as u64));
    }
    if let Some(duration) = replication.duration() {
        eprintln!("  Duration:     {}", format_seconds(duration.num_milliseconds()));
    }
    if let Some(rate) = replication.objects_per_second() {
        eprintln!("  Throughput:   {}", format_rate(rate, "objects"));
    }

    for failed in &replication.failed_keys {
        eprintln!("  Failed: {} - {}", failed.key, failed.error);
    }

    if summary.exceeds_failure_rate(max_failure_rate) {
        eprintln!(
            "  Failure rate {:.1}% exceeds the allowed {:.1}%",
            replication.failure_rate() * 100.0,
            max_failure_rate.unwrap_or_default() * 100.0
        );
        std::process::exit(4); // Partial failure
    }

    Ok(())
}
