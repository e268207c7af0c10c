//! Domain layer: Core lab-result types and classification logic.
//!
//! Everything here is pure: read-only reference tables, a rule-table
//! classifier, and immutable result records.

pub mod classifier;
mod lab_result;
pub mod reference;
mod tier;

pub use classifier::{classify, classify_against};
pub use lab_result::ResultRecord;
pub use reference::{lookup, ReferenceRange};
pub use tier::RiskTier;
