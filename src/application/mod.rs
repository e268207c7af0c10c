//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases: building reports, summarizing them, rendering
//! assistant context, answering questions, and auditing interactions.

pub mod audit;
pub mod chat;
pub mod context;
pub mod insights;
pub mod report;

pub use audit::{hash_identifier, truncate_session_token, validate_session_token, AuditLogger};
pub use chat::{AssistantConfig, ChatService};
pub use context::build_context;
pub use insights::{summarize, QuickInsights};
pub use report::{build_records, parse_sample_report, RawMeasurement};
