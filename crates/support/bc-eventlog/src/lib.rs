//! Run-event log for blindcopy.
//!
//! Probe and copy workers report per-key outcomes as [`RunEvent`]s. Events are
//! sent over an unbounded channel to a single writer task, so lines from
//! concurrent workers never interleave.
//!
//! - [`RunEvent`] / [`EventFormat`] - What is logged and how it is rendered
//! - [`EventLog`] - Cloneable sender handed to the engines
//! - [`EventLogWriter`] - The writer task; [`finish`](EventLogWriter::finish) drains it
//! - [`MemorySink`] - In-memory writer for tests

mod event;
mod log;

pub use event::{EventFormat, RunEvent};
pub use log::{EventLog, EventLogWriter, MemorySink};
