//! Audit sink adapters.
//!
//! - `TracingAuditSink`: emits each entry as a structured `tracing` event
//! - `JsonLinesAuditSink`: appends one JSON object per line to any writer
//! - `MemoryAuditSink`: keeps entries in memory (tests, short-lived sessions)

use std::io::Write;
use std::sync::Mutex;

use crate::ports::{AuditEntry, AuditSink};

/// Audit sink that logs entries through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, entry: &AuditEntry) {
        tracing::info!(
            target: "audit",
            timestamp = %entry.timestamp.to_rfc3339(),
            session = %entry.session,
            event = %entry.event,
            detail = %entry.detail,
            "Interaction logged"
        );
    }
}

/// Audit sink that writes newline-delimited JSON.
pub struct JsonLinesAuditSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesAuditSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl JsonLinesAuditSink<std::fs::File> {
    /// Open (or create) an append-only audit file.
    ///
    /// # Errors
    /// Returns `LabsightError::Io` if the file cannot be opened.
    pub fn append_to(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Send> AuditSink for JsonLinesAuditSink<W> {
    fn record(&self, entry: &AuditEntry) {
        let line = match serde_json::to_string(entry) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Failed to serialize audit entry: {}", e);
                return;
            }
        };

        let Ok(mut writer) = self.writer.lock() else {
            tracing::warn!("Audit writer lock poisoned; entry dropped");
            return;
        };
        if let Err(e) = writeln!(writer, "{line}").and_then(|()| writer.flush()) {
            tracing::warn!("Failed to write audit entry: {}", e);
        }
    }
}

/// In-memory audit sink.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries.
    #[must_use]
    pub fn entries(&self) -> Vec<AuditEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(_) => Vec::new(),
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        match self.entries.lock() {
            Ok(entries) => entries.len(),
            Err(_) => 0,
        }
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, entry: &AuditEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::AuditEvent;
    use chrono::Utc;

    fn entry(detail: &str) -> AuditEntry {
        AuditEntry {
            timestamp: Utc::now(),
            session: "123e4567...".to_string(),
            event: AuditEvent::MedicalQuery,
            detail: detail.to_string(),
        }
    }

    #[test]
    fn test_memory_sink_collects_entries() {
        let sink = MemoryAuditSink::new();
        sink.record(&entry("successful_response"));
        sink.record(&entry("rate_limited"));

        assert_eq!(sink.count(), 2);
        assert_eq!(sink.entries()[1].detail, "rate_limited");
    }

    #[test]
    fn test_json_lines_sink_writes_one_object_per_line() {
        let sink = JsonLinesAuditSink::new(Vec::new());
        sink.record(&entry("successful_response"));
        sink.record(&entry("assistant_error"));

        let text = String::from_utf8(sink.into_inner()).expect("utf8");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: AuditEntry = serde_json::from_str(lines[0]).expect("valid json");
        assert_eq!(parsed.event, AuditEvent::MedicalQuery);
        assert_eq!(parsed.session, "123e4567...");
        assert!(lines[1].contains("\"event\":\"medical_query\""));
    }

    #[test]
    fn test_append_to_creates_file_and_appends() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("audit").join("entries.jsonl");

        JsonLinesAuditSink::append_to(&path)
            .expect("open")
            .record(&entry("successful_response"));
        JsonLinesAuditSink::append_to(&path)
            .expect("reopen")
            .record(&entry("rate_limited"));

        let text = std::fs::read_to_string(&path).expect("read");
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("rate_limited"));
    }

    #[test]
    fn test_tracing_sink_does_not_panic_without_subscriber() {
        TracingAuditSink.record(&entry(""));
    }
}
