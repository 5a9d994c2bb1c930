//! Shared utilities for blindcopy CLI binaries.
//!
//! Logging setup, the `--log-level` argument, and number formatting for the
//! run summary.

pub mod args;
pub mod format;
pub mod logging;

pub use args::{LogLevel, parse_positive_usize};
pub use format::{format_bytes, format_number, format_rate, format_seconds};
pub use logging::init_logging;
