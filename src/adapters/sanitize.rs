//! PII sanitization for user text and log output.
//!
//! Redacts, in this fixed order:
//! - SSNs (`ddd-dd-dddd`)
//! - Phone numbers (`ddd-ddd-dddd`)
//! - Email addresses
//! - US dates (`m/d/yyyy`)
//! - ISO dates (`yyyy-mm-dd`)
//!
//! SSN runs before phone so the two dash-separated digit shapes never claim
//! the same text. Replacement markers contain no digits or `@`, which keeps
//! `sanitize` idempotent.
//!
//! The same rules back [`SanitizingMakeWriter`], which scrubs every formatted
//! log line before it reaches the sink. The log path caps input size (see
//! `LABSIGHT_SANITIZE_MAX_BYTES`); `sanitize()` itself always processes the
//! whole input.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

/// Compiled patterns for PII detection and sanitization.
static PII_PATTERNS: OnceLock<PiiPatterns> = OnceLock::new();

/// Default per-line cap for the log writer (16 KiB).
const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

/// Redaction rules in application order.
const PII_RULES: [(&str, &str); 5] = [
    (r"(?i)\b\d{3}-\d{2}-\d{4}\b", "[SSN_REDACTED]"),
    (r"(?i)\b\d{3}-\d{3}-\d{4}\b", "[PHONE_REDACTED]"),
    (
        r"(?i)\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b",
        "[EMAIL_REDACTED]",
    ),
    (r"(?i)\b\d{1,2}/\d{1,2}/\d{4}\b", "[DATE_REDACTED]"),
    (r"(?i)\b\d{4}-\d{2}-\d{2}\b", "[DATE_REDACTED]"),
];

/// A compiled PII pattern with its replacement text.
struct PiiPattern {
    regex: Regex,
    replacement: &'static str,
}

struct PiiPatterns {
    set: RegexSet,
    ordered: Vec<PiiPattern>,
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes.min(input.len());
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_sanitize_bytes() -> usize {
    std::env::var("LABSIGHT_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn get_patterns() -> &'static PiiPatterns {
    PII_PATTERNS.get_or_init(|| {
        // The rule table is a compile-time constant; a bad pattern is a build defect.
        let set = RegexSet::new(PII_RULES.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let ordered = PII_RULES
            .iter()
            .map(|&(pattern, replacement)| PiiPattern {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        PiiPatterns { set, ordered }
    })
}

/// Redact personally identifying substrings from free text.
///
/// Text without PII comes back unchanged; empty input yields an empty string.
#[must_use]
pub fn sanitize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let patterns = get_patterns();

    // Fast path: single scan for "any match".
    let matched: Vec<usize> = patterns.set.matches(input).into_iter().collect();
    if matched.is_empty() {
        return input.to_string();
    }

    // `matches` yields indices ascending, so rule order is preserved.
    let mut result = input.to_string();
    for idx in matched {
        let pattern = &patterns.ordered[idx];
        result = pattern
            .regex
            .replace_all(&result, pattern.replacement)
            .into_owned();
    }
    result
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);
    let mut out = sanitize(prefix);
    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// Check if a string contains potential PII.
#[must_use]
pub fn contains_pii(input: &str) -> bool {
    get_patterns().set.is_match(input)
}

/// A `tracing_subscriber` writer wrapper that sanitizes formatted log output
/// before it is written to the underlying sink.
#[derive(Debug)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M> Clone for SanitizingMakeWriter<M>
where
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
    max_bytes: usize,
}

impl<W> SanitizingWriter<W> {
    fn new(inner: W, max_bytes: usize) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
            max_bytes,
        }
    }
}

impl<W> SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line = self.buffer.drain(..=pos).collect::<Vec<u8>>();
            let line_str = String::from_utf8_lossy(&line);
            let sanitized = sanitize_with_limit(&line_str, self.max_bytes);
            self.inner.write_all(sanitized.as_bytes())?;
        }
        Ok(())
    }
}

impl<W> std::io::Write for SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A huge line with no newline is flushed early instead of buffered forever.
        let hard_cap = self.max_bytes.saturating_mul(2);
        if self.buffer.len() > hard_cap {
            let s = String::from_utf8_lossy(&self.buffer).to_string();
            let sanitized = sanitize_with_limit(&s, self.max_bytes);
            self.inner.write_all(sanitized.as_bytes())?;
            self.inner.write_all(b"\n")?;
            self.buffer.clear();
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;

        if !self.buffer.is_empty() {
            let s = String::from_utf8_lossy(&self.buffer);
            let sanitized = sanitize_with_limit(&s, self.max_bytes);
            self.inner.write_all(sanitized.as_bytes())?;
            self.buffer.clear();
        }

        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer(), max_sanitize_bytes())
    }
}
