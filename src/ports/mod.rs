//! Ports layer: Trait definitions for external operations.
//!
//! These traits are the boundaries between the core and the outside world:
//! the hosted assistant and the audit log stream.

mod assistant;
mod audit;

pub use assistant::{AnswerGenerator, AssistantError, AssistantRequest};
pub use audit::{AuditEntry, AuditEvent, AuditSink};
