//! Reference ranges and test descriptions.
//!
//! Both tables are process-wide constants. Lookups by test key are indexed
//! once on first use and shared read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

/// Upper bound used when a test has no clinically meaningful maximum.
pub const OPEN_UPPER_BOUND: f64 = 999.0;

/// Description used for tests missing from the description table.
pub const GENERIC_DESCRIPTION: &str = "Lab test result";

/// Catalog-defined `[min, max]` interval and unit for one test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceRange {
    /// Normalized test key (lower-case, spaces replaced by underscores)
    pub test_key: &'static str,
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

impl ReferenceRange {
    const fn new(test_key: &'static str, min: f64, max: f64, unit: &'static str) -> Self {
        Self {
            test_key,
            min,
            max,
            unit,
        }
    }
}

/// Reference ranges for every supported test.
pub static REFERENCE_RANGES: [ReferenceRange; 13] = [
    ReferenceRange::new("glucose", 70.0, 100.0, "mg/dL"),
    ReferenceRange::new("hemoglobin", 12.0, 16.0, "g/dL"),
    ReferenceRange::new("total_cholesterol", 0.0, 200.0, "mg/dL"),
    ReferenceRange::new("ldl_cholesterol", 0.0, 100.0, "mg/dL"),
    ReferenceRange::new("hdl_cholesterol", 40.0, OPEN_UPPER_BOUND, "mg/dL"),
    ReferenceRange::new("triglycerides", 0.0, 150.0, "mg/dL"),
    ReferenceRange::new("creatinine", 0.6, 1.2, "mg/dL"),
    ReferenceRange::new("bun", 7.0, 20.0, "mg/dL"),
    ReferenceRange::new("white_blood_cells", 4.0, 11.0, "K/uL"),
    ReferenceRange::new("red_blood_cells", 4.2, 5.4, "M/uL"),
    ReferenceRange::new("platelets", 150.0, 450.0, "K/uL"),
    ReferenceRange::new("tsh", 0.4, 4.0, "mIU/L"),
    ReferenceRange::new("vitamin_d", 30.0, 100.0, "ng/mL"),
];

/// Plain-language descriptions, keyed by display name.
pub static TEST_DESCRIPTIONS: [(&str, &str); 13] = [
    ("Glucose", "Measures blood sugar levels"),
    ("Hemoglobin", "Protein in red blood cells that carries oxygen"),
    ("Total Cholesterol", "Total amount of cholesterol in blood"),
    ("LDL Cholesterol", "Low-density lipoprotein (bad cholesterol)"),
    ("HDL Cholesterol", "High-density lipoprotein (good cholesterol)"),
    ("Triglycerides", "Type of fat found in blood"),
    ("Creatinine", "Waste product filtered by kidneys"),
    ("BUN", "Blood Urea Nitrogen - kidney function indicator"),
    ("White Blood Cells", "Cells that fight infection"),
    ("Red Blood Cells", "Cells that carry oxygen"),
    ("Platelets", "Cells that help blood clot"),
    ("TSH", "Thyroid Stimulating Hormone"),
    ("Vitamin D", "Essential vitamin for bone health"),
];

static RANGE_INDEX: OnceLock<HashMap<&'static str, &'static ReferenceRange>> = OnceLock::new();
static DESCRIPTION_INDEX: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn range_index() -> &'static HashMap<&'static str, &'static ReferenceRange> {
    RANGE_INDEX.get_or_init(|| REFERENCE_RANGES.iter().map(|r| (r.test_key, r)).collect())
}

fn description_index() -> &'static HashMap<&'static str, &'static str> {
    DESCRIPTION_INDEX.get_or_init(|| TEST_DESCRIPTIONS.iter().copied().collect())
}

/// Normalize a display name into a catalog key.
///
/// Only lower-cases and replaces spaces; there is no synonym handling.
#[must_use]
pub fn normalize_test_key(test_name: &str) -> String {
    test_name.to_lowercase().replace(' ', "_")
}

/// Look up the reference range for a test by display name.
///
/// Returns `None` for tests outside the catalog.
#[must_use]
pub fn lookup(test_name: &str) -> Option<&'static ReferenceRange> {
    range_index().get(normalize_test_key(test_name).as_str()).copied()
}

/// Description for a test, matched by exact display name.
#[must_use]
pub fn describe(test_name: &str) -> &'static str {
    description_index()
        .get(test_name)
        .copied()
        .unwrap_or(GENERIC_DESCRIPTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(normalize_test_key("White Blood Cells"), "white_blood_cells");
        assert_eq!(normalize_test_key("TSH"), "tsh");
    }

    #[test]
    fn test_lookup_hit() {
        let range = lookup("Glucose").expect("glucose is cataloged");
        assert_eq!(range.test_key, "glucose");
        assert!((range.min - 70.0).abs() < f64::EPSILON);
        assert!((range.max - 100.0).abs() < f64::EPSILON);
        assert_eq!(range.unit, "mg/dL");

        assert!(lookup("Total Cholesterol").is_some());
        assert!(lookup("vitamin d").is_some());
    }

    #[test]
    fn test_lookup_is_exact() {
        assert!(lookup("Unobtainium").is_none());
        assert!(lookup("Glucose ").is_none());
        assert!(lookup("blood glucose").is_none());
    }

    #[test]
    fn test_ranges_are_ordered() {
        for range in &REFERENCE_RANGES {
            assert!(range.min <= range.max, "{} has min > max", range.test_key);
            assert_eq!(range.test_key, normalize_test_key(range.test_key));
        }
    }

    #[test]
    fn test_every_described_test_is_cataloged() {
        for (name, _) in TEST_DESCRIPTIONS.iter() {
            assert!(lookup(name).is_some(), "{name} missing from catalog");
        }
    }

    #[test]
    fn test_describe_fallback() {
        assert_eq!(describe("TSH"), "Thyroid Stimulating Hormone");
        assert_eq!(describe("tsh"), GENERIC_DESCRIPTION);
        assert_eq!(describe(""), GENERIC_DESCRIPTION);
    }
}
