//! Assistant context rendering.
//!
//! The line shape is part of the prompt contract and must stay stable:
//! `{glyph} {name}: {value} {unit} (Reference: {range}) - Status: {label}`

use std::fmt::Write;

use crate::domain::ResultRecord;

/// Context returned when there is nothing to describe.
pub const EMPTY_CONTEXT: &str = "No lab results available.";

const CONTEXT_HEADER: &str = "Patient Lab Results:\n\n";

/// Render one record as a context line (without trailing newline).
#[must_use]
pub fn context_line(record: &ResultRecord) -> String {
    format!(
        "{} {}: {} {} (Reference: {}) - Status: {}",
        record.tier().glyph(),
        record.test_name(),
        record.value(),
        record.unit(),
        record.reference_range(),
        record.tier().label()
    )
}

/// Render records into the context block handed to the assistant.
#[must_use]
pub fn build_context(records: &[ResultRecord]) -> String {
    if records.is_empty() {
        return EMPTY_CONTEXT.to_string();
    }

    let mut context = String::from(CONTEXT_HEADER);
    for record in records {
        // Writing to a String cannot fail.
        let _ = writeln!(context, "{}", context_line(record));
    }
    context
}
