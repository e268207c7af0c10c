//! # Labsight
//!
//! Lab result risk classification and privacy-safe assistant context.
//!
//! This crate provides:
//! - Rule-table classification of lab values into risk tiers
//! - PII redaction for user text and log output
//! - Redacted audit logging of assistant interactions
//! - Tier summaries and the context block handed to an external assistant
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Reference catalog, classifier, result records
//! - `ports`: Trait definitions for the assistant and audit sinks
//! - `adapters`: Sanitizer, audit sinks, offline answer generator
//! - `application`: Report building, insights, context, chat, audit

#![deny(clippy::wildcard_enum_match_arm)]

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use domain::{classify, ResultRecord, RiskTier};

/// Result type for Labsight operations
pub type Result<T> = std::result::Result<T, LabsightError>;

/// Main error type for Labsight
#[derive(Debug, thiserror::Error)]
pub enum LabsightError {
    #[error("Assistant call failed: {0}")]
    Assistant(#[from] ports::AssistantError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
