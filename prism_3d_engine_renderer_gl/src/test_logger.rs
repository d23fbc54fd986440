//! Capturing logger shared by the backend's unit tests

use std::sync::{Arc, Mutex};
use prism_3d_engine::prism3d::Engine;
use prism_3d_engine::prism3d::log::{LogEntry, LogSeverity, Logger};

/// Logger that keeps every entry for inspection
pub(crate) struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CaptureLogger {
    /// Install as the engine logger; tests using it must be `#[serial]`
    pub(crate) fn install() -> Arc<Mutex<Vec<LogEntry>>> {
        let entries = Arc::new(Mutex::new(Vec::new()));
        Engine::set_logger(Self { entries: entries.clone() });
        entries
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

/// Error entries from `source`
pub(crate) fn errors_from(entries: &Arc<Mutex<Vec<LogEntry>>>, source: &str) -> Vec<LogEntry> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|entry| entry.source == source && entry.severity == LogSeverity::Error)
        .cloned()
        .collect()
}
