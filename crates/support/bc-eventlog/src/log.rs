//! Channel-backed event log and its writer task.

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{EventFormat, RunEvent};

enum Command {
    Event(RunEvent),
    Flush(oneshot::Sender<()>),
}

/// Sender side of the event log.
///
/// Cheap to clone; every clone feeds the same writer. Emitting never blocks.
#[derive(Debug, Clone)]
pub struct EventLog {
    tx: mpsc::UnboundedSender<Command>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Event(event) => f.debug_tuple("Event").field(event).finish(),
            Self::Flush(_) => f.write_str("Flush"),
        }
    }
}

impl EventLog {
    /// Spawn a writer task rendering events to `writer` in `format`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<W>(writer: W, format: EventFormat) -> (EventLog, EventLogWriter)
    where
        W: Write + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(write_events(rx, writer, format));
        (EventLog { tx }, EventLogWriter { handle })
    }

    /// Spawn a writer task on stdout.
    pub fn stdout(format: EventFormat) -> (EventLog, EventLogWriter) {
        Self::spawn(io::stdout(), format)
    }

    /// Queue an event for writing.
    pub fn emit(&self, event: RunEvent) {
        if self.tx.send(Command::Event(event)).is_err() {
            debug!("Event log writer has stopped; dropping event");
        }
    }

    /// Queue an `INFO:` line.
    pub fn info(&self, message: impl Into<String>) {
        self.emit(RunEvent::info(message));
    }

    /// Wait until every event queued before this call has been written and flushed.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }
}

/// Handle to the writer task.
#[derive(Debug)]
pub struct EventLogWriter {
    handle: JoinHandle<io::Result<u64>>,
}

impl EventLogWriter {
    /// Wait for the writer to drain and stop.
    ///
    /// The writer stops once every [`EventLog`] clone has been dropped, so drop
    /// them before awaiting this. Returns the number of events written, or the
    /// first write error.
    pub async fn finish(self) -> io::Result<u64> {
        self.handle.await.map_err(io::Error::other)?
    }
}

async fn write_events<W: Write>(
    mut rx: mpsc::UnboundedReceiver<Command>,
    mut writer: W,
    format: EventFormat,
) -> io::Result<u64> {
    let mut written = 0u64;
    let mut first_error: Option<io::Error> = None;

    while let Some(command) = rx.recv().await {
        match command {
            Command::Event(event) => {
                if first_error.is_some() {
                    continue;
                }
                let line = event.render(format);
                match writeln!(writer, "{line}") {
                    Ok(()) => written += 1,
                    Err(e) => {
                        warn!(error = %e, "Event log write failed; discarding further events");
                        first_error = Some(e);
                    }
                }
            }
            Command::Flush(ack) => {
                if first_error.is_none() {
                    if let Err(e) = writer.flush() {
                        warn!(error = %e, "Event log flush failed");
                        first_error = Some(e);
                    }
                }
                let _ = ack.send(());
            }
        }
    }

    if first_error.is_none() {
        writer.flush()?;
    }

    debug!(events = written, "Event log writer stopped");

    match first_error {
        Some(e) => Err(e),
        None => Ok(written),
    }
}

/// A cloneable in-memory writer.
///
/// Every clone appends to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Written lines, in order.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Lines starting with `prefix` (e.g. "COPIED:").
    pub fn lines_starting_with(&self, prefix: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.starts_with(prefix))
            .collect()
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
