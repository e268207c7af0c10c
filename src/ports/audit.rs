//! Audit port: Destination for compliance audit entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of auditable interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEvent {
    /// A question about lab results was sent to the assistant
    MedicalQuery,
    /// A report was loaded into the session
    ReportLoaded,
    /// The caller discarded the session's state
    SessionCleared,
}

impl AuditEvent {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MedicalQuery => "medical_query",
            Self::ReportLoaded => "report_loaded",
            Self::SessionCleared => "session_cleared",
        }
    }
}

impl std::fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One redacted audit record.
///
/// Holds labels only; free-text query content never reaches an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    /// Session token truncated to its first 8 characters
    pub session: String,

    pub event: AuditEvent,

    pub detail: String,
}

/// Trait for audit sinks.
///
/// Recording is fire-and-forget: sinks swallow their own failures.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: &AuditEntry);
}

impl<T: AuditSink + ?Sized> AuditSink for std::sync::Arc<T> {
    fn record(&self, entry: &AuditEntry) {
        (**self).record(entry);
    }
}
