//! Audit logging and session privacy helpers.
//!
//! The audit logger never sees free-text query content: callers pass an
//! event kind and a short detail label, and the session token is truncated
//! before it leaves this module.

use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::adapters::TracingAuditSink;
use crate::ports::{AuditEntry, AuditEvent, AuditSink};

/// Characters of the session token kept in audit entries.
pub const SESSION_PREFIX_LEN: usize = 8;

/// Minimum length of a plausible session token.
const MIN_SESSION_TOKEN_LEN: usize = 10;

/// Hex characters kept from a hashed identifier.
const HASHED_ID_LEN: usize = 12;

static UUID_PATTERN: OnceLock<Regex> = OnceLock::new();

fn uuid_pattern() -> &'static Regex {
    UUID_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
            .expect("Valid regex")
    })
}

/// Shorten a session token for logging: first 8 characters plus `...`.
#[must_use]
pub fn truncate_session_token(token: &str) -> String {
    match token.char_indices().nth(SESSION_PREFIX_LEN) {
        Some((end, _)) => format!("{}...", &token[..end]),
        None => token.to_string(),
    }
}

/// Whether a token has the canonical UUID shape (8-4-4-4-12 hex, any case).
///
/// Advisory only: callers log a failure and keep processing.
#[must_use]
pub fn validate_session_token(token: &str) -> bool {
    if token.len() < MIN_SESSION_TOKEN_LEN {
        return false;
    }
    uuid_pattern().is_match(token)
}

/// Hash a patient identifier for display: first 12 hex chars of SHA-256.
#[must_use]
pub fn hash_identifier(identifier: &str) -> String {
    if identifier.is_empty() {
        return String::new();
    }

    let digest = Sha256::digest(identifier.as_bytes());
    let mut hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex.truncate(HASHED_ID_LEN);
    hex
}

/// Privacy guarantees shown alongside the results.
#[must_use]
pub fn privacy_info() -> [&'static str; 5] {
    [
        "🔒 No data is permanently stored",
        "🔐 Patient identifiers are hashed",
        "📝 Interactions logged without PII",
        "⏰ Session-based data only",
        "🛡️ Input sanitization removes sensitive info",
    ]
}

/// Records redacted interaction summaries for compliance.
pub struct AuditLogger {
    sinks: Vec<Box<dyn AuditSink>>,
}

impl std::fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditLogger")
            .field("sink_count", &self.sinks.len())
            .finish()
    }
}

impl Default for AuditLogger {
    /// Logger writing to the tracing stream.
    fn default() -> Self {
        Self::with_sinks(vec![Box::new(TracingAuditSink)])
    }
}

impl AuditLogger {
    /// Create a logger that forwards to the given sinks.
    #[must_use]
    pub fn with_sinks(sinks: Vec<Box<dyn AuditSink>>) -> Self {
        Self { sinks }
    }

    /// Record an interaction.
    pub fn log(&self, session_token: &str, event: AuditEvent, detail: &str) {
        let entry = AuditEntry {
            timestamp: Utc::now(),
            session: truncate_session_token(session_token),
            event,
            detail: detail.to_string(),
        };

        for sink in &self.sinks {
            sink.record(&entry);
        }
    }
}
