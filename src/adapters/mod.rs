//! Adapters layer: Concrete implementations of ports.
//!
//! - `sanitize`: PII redaction for user text and log output
//! - `audit`: audit sinks (tracing, JSON lines, in-memory)
//! - `template`: offline answer generator

pub mod audit;
pub mod sanitize;
pub mod template;

pub use audit::{JsonLinesAuditSink, MemoryAuditSink, TracingAuditSink};
pub use template::TemplateAssistant;
