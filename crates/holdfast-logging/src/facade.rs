//! The process-wide pluggable facade.
//!
//! Library and host code produce records; where they end up is decided once,
//! at configuration time, by installing a [`LogSink`]. The facade itself
//! implements [`LogSink`] so collaborators can hold it as a sink handle —
//! which is exactly why [`install`] must reject the facade's own handle:
//! installing it would make every record forward to itself forever.

use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use thiserror::Error;

use crate::types::LogRecord;

/// Destination for forwarded log records.
pub trait LogSink: Send + Sync + 'static {
    /// Consume one record.
    fn log(&self, record: &LogRecord);

    /// Flush any buffered records. Defaults to a no-op.
    fn flush(&self) {}
}

/// Capturing sink backed by a vector, for tests and harnesses.
#[derive(Default)]
pub struct MemorySink {
    records: parking_lot::Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Drop all captured records.
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl LogSink for MemorySink {
    fn log(&self, record: &LogRecord) {
        self.records.lock().push(record.clone());
    }
}

/// Errors from configuring the facade.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LogError {
    /// The facade was handed its own handle as the backing sink.
    #[error("recursive logger registration: the facade cannot be installed as its own sink")]
    RecursiveLogger,
}

static FACADE: LazyLock<Arc<Facade>> = LazyLock::new(|| {
    Arc::new(Facade {
        sink: RwLock::new(None),
    })
});

/// Forwards records to the installed sink; drops them while none is
/// installed.
pub struct Facade {
    sink: RwLock<Option<Arc<dyn LogSink>>>,
}

impl Facade {
    /// The process-wide facade instance.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&FACADE)
    }

    /// Whether a sink is currently installed.
    #[must_use]
    pub fn has_sink(&self) -> bool {
        self.sink.read().is_some()
    }
}

impl LogSink for Facade {
    fn log(&self, record: &LogRecord) {
        if let Some(sink) = self.sink.read().as_ref() {
            sink.log(record);
        }
    }

    fn flush(&self) {
        if let Some(sink) = self.sink.read().as_ref() {
            sink.flush();
        }
    }
}

/// Install the process-wide backing sink, replacing any previous one.
///
/// Rejects the facade's own handle: that registration would recurse on the
/// first forwarded record, so it fails here, at configuration time.
pub fn install(sink: Arc<dyn LogSink>) -> Result<(), LogError> {
    let own: Arc<dyn LogSink> = Facade::global();
    if Arc::ptr_eq(&sink, &own) {
        return Err(LogError::RecursiveLogger);
    }
    *Facade::global().sink.write() = Some(sink);
    Ok(())
}

/// Remove the installed sink; records are dropped until the next
/// [`install`].
pub fn uninstall() {
    *Facade::global().sink.write() = None;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
