use crate::domain::ports::AuditSink;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Appends timestamped audit lines to a log file. A failed write is logged
/// at debug level and otherwise ignored; losing an audit line must never
/// fail the operation that produced it.
#[derive(Debug, Clone)]
pub struct FileAudit {
    path: PathBuf,
}

impl FileAudit {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl AuditSink for FileAudit {
    fn record(&self, message: &str) {
        let line = format!("{} - {}\n", Local::now().format("%Y-%m-%d %H:%M:%S"), message);
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
        if let Err(e) = written {
            tracing::debug!("Audit write to {} failed: {}", self.path.display(), e);
        }
    }
}

/// Discards everything. Used by tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct NullAudit;

impl AuditSink for NullAudit {
    fn record(&self, _message: &str) {}
}
