//! Classified lab result records.

use serde::{Deserialize, Serialize};

use super::classifier;
use super::reference;
use super::tier::RiskTier;

/// A single classified lab test result.
///
/// Records are immutable once built. Re-classifying a value produces a new
/// record through [`ResultRecord::with_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    test_name: String,
    value: f64,
    /// Unit as supplied by the caller; not checked against the catalog unit
    unit: String,
    /// Reference range as printed on the source report (e.g. "<200", "70-100")
    reference_range: String,
    tier: RiskTier,
    description: String,
}

impl ResultRecord {
    /// Build a classified record from a raw measurement.
    ///
    /// Unknown tests get the `Normal` tier and a generic description.
    #[must_use]
    pub fn build(
        test_name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        reference_range: impl Into<String>,
    ) -> Self {
        let test_name = test_name.into();
        let tier = classifier::classify(&test_name, value);
        let description = reference::describe(&test_name).to_string();

        Self {
            test_name,
            value,
            unit: unit.into(),
            reference_range: reference_range.into(),
            tier,
            description,
        }
    }

    /// A new record for the same test with a different value.
    #[must_use]
    pub fn with_value(&self, value: f64) -> Self {
        Self::build(
            self.test_name.clone(),
            value,
            self.unit.clone(),
            self.reference_range.clone(),
        )
    }

    #[must_use]
    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub fn reference_range(&self) -> &str {
        &self.reference_range
    }

    #[must_use]
    pub fn tier(&self) -> RiskTier {
        self.tier
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the result is outside its reference range.
    #[must_use]
    pub fn is_abnormal(&self) -> bool {
        self.tier.is_abnormal()
    }
}

impl std::fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} {} ({})",
            self.test_name, self.value, self.unit, self.tier
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_classifies_and_describes() {
        let record = ResultRecord::build("Total Cholesterol", 220.0, "mg/dL", "<200");

        assert_eq!(record.test_name(), "Total Cholesterol");
        assert_eq!(record.tier(), RiskTier::High);
        assert_eq!(record.description(), "Total amount of cholesterol in blood");
        assert_eq!(record.reference_range(), "<200");
        assert!(record.is_abnormal());
    }

    #[test]
    fn test_unknown_test_uses_fallbacks() {
        let record = ResultRecord::build("Ferritin", 80.0, "ng/mL", "20-250");

        assert_eq!(record.tier(), RiskTier::Normal);
        assert_eq!(record.description(), "Lab test result");
        assert!(!record.is_abnormal());
    }

    #[test]
    fn test_unit_is_taken_verbatim() {
        let record = ResultRecord::build("Glucose", 5.0, "mmol/L", "3.9-5.6");
        assert_eq!(record.unit(), "mmol/L");
        // Classified against the mg/dL catalog range regardless of the unit.
        assert_eq!(record.tier(), RiskTier::Critical);
    }

    #[test]
    fn test_with_value_reclassifies_without_mutation() {
        let original = ResultRecord::build("Vitamin D", 25.0, "ng/mL", "30-100");
        let updated = original.with_value(50.0);

        assert_eq!(original.tier(), RiskTier::Low);
        assert_eq!(updated.tier(), RiskTier::Normal);
        assert_eq!(updated.test_name(), original.test_name());
        assert_eq!(updated.reference_range(), original.reference_range());
    }

    #[test]
    fn test_display() {
        let record = ResultRecord::build("Hemoglobin", 13.5, "g/dL", "12.0-16.0");
        assert_eq!(record.to_string(), "Hemoglobin: 13.5 g/dL (Normal)");

        let record = ResultRecord::build("Glucose", 95.0, "mg/dL", "70-100");
        assert_eq!(record.to_string(), "Glucose: 95 mg/dL (Borderline)");
    }
}
