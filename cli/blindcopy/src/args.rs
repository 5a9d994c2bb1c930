//! CLI argument definitions for blindcopy.

use bc_cli_common::{LogLevel, parse_positive_usize};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Replicate objects from a bucket you cannot list.
///
/// Guesses object keys from the given vocabularies, confirms each guess with a
/// HeadObject request against the source bucket, saves the confirmed keys, and
/// server-side copies them into the destination bucket.
///
/// Per-key results are written to stdout; diagnostics go to stderr.
///
/// ## Examples
///
/// Basic usage:
///   blindcopy --source-bucket cert-9898 --source-region us-east-1 \
///       --dest-bucket archive --dest-region ca-central-1 \
///       --key-prefixes backup --folder-patterns data --file-extensions csv
///
/// Copy a list saved by an earlier run:
///   blindcopy ... --reuse-object-list --object-list-file discovered_objects.txt
///
/// Preview without copying:
///   blindcopy ... --builtin-vocabulary --dry-run
#[derive(Parser, Debug)]
#[command(name = "blindcopy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Buckets ===
    /// Source bucket name
    #[arg(long, env = "SOURCE_BUCKET")]
    pub source_bucket: String,

    /// Source bucket region
    #[arg(long, env = "SOURCE_REGION")]
    pub source_region: String,

    /// Destination bucket name
    #[arg(long, env = "DEST_BUCKET")]
    pub dest_bucket: String,

    /// Destination bucket region
    #[arg(long, env = "DEST_REGION")]
    pub dest_region: String,

    // === Vocabularies (comma-separated; empty skips the axis) ===
    /// Key prefixes (e.g. "backup,export")
    #[arg(long, env = "KEY_PREFIXES", default_value = "")]
    pub key_prefixes: String,

    /// Folder patterns (e.g. "data,reports")
    #[arg(long, env = "FOLDER_PATTERNS", default_value = "")]
    pub folder_patterns: String,

    /// Filename tokens (e.g. "index,summary")
    #[arg(long, env = "FILE_NAMES", default_value = "")]
    pub file_names: String,

    /// File extensions without the dot (e.g. "csv,pdf")
    #[arg(long, env = "FILE_EXTENSIONS", default_value = "")]
    pub file_extensions: String,

    /// Also try common folder names, file names and extensions
    #[arg(long)]
    pub builtin_vocabulary: bool,

    // === Run options ===
    /// Maximum concurrent probes or copies (must be >= 1)
    #[arg(long, env = "MAX_WORKERS", default_value = "20", value_parser = parse_positive_usize)]
    pub max_workers: usize,

    /// Where the discovered keys are saved
    #[arg(long, env = "OBJECT_LIST_FILE", default_value = "discovered_objects.txt")]
    pub object_list_file: PathBuf,

    /// Skip discovery when the object list file already exists
    #[arg(
        long,
        env = "REUSE_OBJECT_LIST",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub reuse_object_list: bool,

    /// Report what would be copied without copying
    #[arg(
        long,
        env = "DRY_RUN",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub dry_run: bool,

    /// Skip keys that already exist in the destination
    #[arg(
        long,
        env = "SKIP_EXISTING",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub skip_existing: bool,

    /// Maximum number of candidate keys to probe (0 = unlimited)
    #[arg(long, default_value = "0")]
    pub max_candidates: usize,

    /// Operations between progress lines (0 = disabled)
    #[arg(long, default_value = "500")]
    pub progress_interval: usize,

    /// Exit with status 4 when the copy failure rate exceeds this fraction (0..=1)
    #[arg(long, value_parser = parse_rate)]
    pub max_failure_rate: Option<f64>,

    // === S3 client ===
    /// Custom S3 endpoint URL (for LocalStack)
    #[arg(long, env = "BC_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// AWS profile name
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Attempts per request, SDK retries included (must be >= 1)
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Per-request timeout in seconds (must be >= 1)
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    // === Output ===
    /// Format of the per-key event lines on stdout
    #[arg(long, value_enum, default_value = "text")]
    pub event_format: EventFormatArg,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Event format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventFormatArg {
    /// `STATUS: key` lines
    Text,
    /// JSON Lines (one JSON object per line)
    Jsonl,
}

impl From<EventFormatArg> for bc_eventlog::EventFormat {
    fn from(arg: EventFormatArg) -> Self {
        match arg {
            EventFormatArg::Text => bc_eventlog::EventFormat::Text,
            EventFormatArg::Jsonl => bc_eventlog::EventFormat::Jsonl,
        }
    }
}

/// Parse a fraction within 0..=1.
fn parse_rate(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{value} is outside 0..=1"));
    }
    Ok(value)
}
