//! Report service: Turns raw measurements into classified records.

use serde::{Deserialize, Serialize};

use crate::domain::ResultRecord;

/// A measurement as read from a report, before classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMeasurement {
    pub test_name: String,
    pub value: f64,
    pub unit: String,
    pub reference_range: String,
}

impl RawMeasurement {
    pub fn new(
        test_name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        reference_range: impl Into<String>,
    ) -> Self {
        Self {
            test_name: test_name.into(),
            value,
            unit: unit.into(),
            reference_range: reference_range.into(),
        }
    }

    /// Classify this measurement into a record.
    #[must_use]
    pub fn classify(&self) -> ResultRecord {
        ResultRecord::build(
            self.test_name.as_str(),
            self.value,
            self.unit.as_str(),
            self.reference_range.as_str(),
        )
    }
}

/// Canonical demonstration panel: (name, value, unit, printed range).
pub const SAMPLE_LAB_DATA: [(&str, f64, &str, &str); 13] = [
    ("Glucose", 95.0, "mg/dL", "70-100"),
    ("Hemoglobin", 13.5, "g/dL", "12.0-16.0"),
    ("Total Cholesterol", 220.0, "mg/dL", "<200"),
    ("LDL Cholesterol", 130.0, "mg/dL", "<100"),
    ("HDL Cholesterol", 45.0, "mg/dL", ">40"),
    ("Triglycerides", 180.0, "mg/dL", "<150"),
    ("Creatinine", 1.0, "mg/dL", "0.6-1.2"),
    ("BUN", 15.0, "mg/dL", "7-20"),
    ("White Blood Cells", 7.5, "K/uL", "4.0-11.0"),
    ("Red Blood Cells", 4.8, "M/uL", "4.2-5.4"),
    ("Platelets", 250.0, "K/uL", "150-450"),
    ("TSH", 2.5, "mIU/L", "0.4-4.0"),
    ("Vitamin D", 25.0, "ng/mL", "30-100"),
];

/// Classify a batch of measurements, preserving input order.
#[must_use]
pub fn build_records(measurements: &[RawMeasurement]) -> Vec<ResultRecord> {
    measurements.iter().map(RawMeasurement::classify).collect()
}

/// The sample report: the same thirteen records, in the same order, every call.
#[must_use]
pub fn parse_sample_report() -> Vec<ResultRecord> {
    let results: Vec<ResultRecord> = SAMPLE_LAB_DATA
        .iter()
        .map(|&(name, value, unit, range)| ResultRecord::build(name, value, unit, range))
        .collect();

    tracing::info!("Generated {} sample lab results", results.len());
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskTier;

    #[test]
    fn test_sample_report_is_stable() {
        let first = parse_sample_report();
        let second = parse_sample_report();

        assert_eq!(first.len(), 13);
        assert_eq!(first, second);
        assert_eq!(first[0].test_name(), "Glucose");
        assert_eq!(first[12].test_name(), "Vitamin D");
    }

    #[test]
    fn test_sample_report_tiers() {
        let tiers: Vec<(String, RiskTier)> = parse_sample_report()
            .iter()
            .map(|r| (r.test_name().to_string(), r.tier()))
            .collect();

        let expect = |name: &str| {
            tiers
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, t)| *t)
                .expect("present")
        };

        assert_eq!(expect("Glucose"), RiskTier::Borderline);
        assert_eq!(expect("Hemoglobin"), RiskTier::Normal);
        assert_eq!(expect("Total Cholesterol"), RiskTier::High);
        assert_eq!(expect("LDL Cholesterol"), RiskTier::High);
        assert_eq!(expect("HDL Cholesterol"), RiskTier::Normal);
        assert_eq!(expect("Triglycerides"), RiskTier::High);
        assert_eq!(expect("Vitamin D"), RiskTier::Low);
        assert_eq!(expect("TSH"), RiskTier::Normal);
    }

    #[test]
    fn test_build_records_preserves_order() {
        let raw = vec![
            RawMeasurement::new("TSH", 9.0, "mIU/L", "0.4-4.0"),
            RawMeasurement::new("Mystery Panel", 1.0, "u", "n/a"),
            RawMeasurement::new("Platelets", 60.0, "K/uL", "150-450"),
        ];
        let records = build_records(&raw);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].tier(), RiskTier::Critical);
        assert_eq!(records[1].tier(), RiskTier::Normal);
        assert_eq!(records[1].description(), "Lab test result");
        assert_eq!(records[2].tier(), RiskTier::Critical);
    }

    #[test]
    fn test_empty_batch() {
        assert!(build_records(&[]).is_empty());
    }
}
