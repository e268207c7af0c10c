//! Risk tier classification against catalog reference ranges.
//!
//! Classification is an ordered rule table evaluated top to bottom; the first
//! matching rule decides the tier and `Normal` is the fallthrough. Each rule
//! is a plain predicate over `(range, value)` so it can be checked on its own.

use super::reference::{self, ReferenceRange};
use super::tier::RiskTier;

/// Below `min * CRITICAL_LOW_FACTOR` is critical.
pub const CRITICAL_LOW_FACTOR: f64 = 0.5;
/// Above `max * CRITICAL_HIGH_FACTOR` is critical.
pub const CRITICAL_HIGH_FACTOR: f64 = 2.0;
/// Values in `[min, min * BORDERLINE_LOW_FACTOR)` are borderline.
pub const BORDERLINE_LOW_FACTOR: f64 = 1.1;
/// Values in `(max * BORDERLINE_HIGH_FACTOR, max]` are borderline.
pub const BORDERLINE_HIGH_FACTOR: f64 = 0.9;

/// One entry of the classification table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub tier: RiskTier,
    pub matches: fn(&ReferenceRange, f64) -> bool,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("tier", &self.tier)
            .finish()
    }
}

fn is_critical(range: &ReferenceRange, value: f64) -> bool {
    value < range.min * CRITICAL_LOW_FACTOR || value > range.max * CRITICAL_HIGH_FACTOR
}

fn is_high(range: &ReferenceRange, value: f64) -> bool {
    value > range.max
}

fn is_low(range: &ReferenceRange, value: f64) -> bool {
    value < range.min
}

// Out-of-range values never reach this rule, so only the band edges are checked.
fn is_borderline(range: &ReferenceRange, value: f64) -> bool {
    value < range.min * BORDERLINE_LOW_FACTOR || value > range.max * BORDERLINE_HIGH_FACTOR
}

/// Classification rules in priority order.
pub static RULES: [Rule; 4] = [
    Rule {
        name: "critical",
        tier: RiskTier::Critical,
        matches: is_critical,
    },
    Rule {
        name: "high",
        tier: RiskTier::High,
        matches: is_high,
    },
    Rule {
        name: "low",
        tier: RiskTier::Low,
        matches: is_low,
    },
    Rule {
        name: "borderline",
        tier: RiskTier::Borderline,
        matches: is_borderline,
    },
];

/// Classify a value against an explicit reference range.
#[must_use]
pub fn classify_against(range: &ReferenceRange, value: f64) -> RiskTier {
    RULES
        .iter()
        .find(|rule| (rule.matches)(range, value))
        .map_or(RiskTier::Normal, |rule| rule.tier)
}

/// Classify a lab value by test name.
///
/// Tests missing from the catalog classify as `Normal`. The miss is logged
/// and never surfaced as an error.
#[must_use]
pub fn classify(test_name: &str, value: f64) -> RiskTier {
    match reference::lookup(test_name) {
        Some(range) => classify_against(range, value),
        None => {
            tracing::warn!("No reference range found for test: {}", test_name);
            RiskTier::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLUCOSE: ReferenceRange = ReferenceRange {
        test_key: "glucose",
        min: 70.0,
        max: 100.0,
        unit: "mg/dL",
    };

    #[test]
    fn test_rule_predicates_in_isolation() {
        assert!(is_critical(&GLUCOSE, 34.9));
        assert!(is_critical(&GLUCOSE, 200.5));
        assert!(!is_critical(&GLUCOSE, 35.0));
        assert!(!is_critical(&GLUCOSE, 200.0));

        assert!(is_high(&GLUCOSE, 100.1));
        assert!(!is_high(&GLUCOSE, 100.0));
        assert!(is_low(&GLUCOSE, 69.9));
        assert!(!is_low(&GLUCOSE, 70.0));

        assert!(is_borderline(&GLUCOSE, 70.0));
        assert!(is_borderline(&GLUCOSE, 76.9));
        assert!(!is_borderline(&GLUCOSE, 77.5));
        assert!(!is_borderline(&GLUCOSE, 90.0));
        assert!(is_borderline(&GLUCOSE, 90.1));
        assert!(is_borderline(&GLUCOSE, 100.0));
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, ["critical", "high", "low", "borderline"]);
    }

    #[test]
    fn test_glucose_scenarios() {
        assert_eq!(classify("Glucose", 85.0), RiskTier::Normal);
        // 95 sits inside the upper 10% band (> 90).
        assert_eq!(classify("Glucose", 95.0), RiskTier::Borderline);
        assert_eq!(classify("Glucose", 150.0), RiskTier::High);
        // Exactly 2x max is not past the critical threshold.
        assert_eq!(classify("Glucose", 200.0), RiskTier::High);
        assert_eq!(classify("Glucose", 200.01), RiskTier::Critical);
        assert_eq!(classify("Glucose", 201.0), RiskTier::Critical);
        assert_eq!(classify("Glucose", 50.0), RiskTier::Low);
        assert_eq!(classify("Glucose", 35.0), RiskTier::Low);
        assert_eq!(classify("Glucose", 34.0), RiskTier::Critical);
    }

    #[test]
    fn test_total_cholesterol_high() {
        assert_eq!(classify("Total Cholesterol", 220.0), RiskTier::High);
        assert_eq!(classify("Total Cholesterol", 401.0), RiskTier::Critical);
    }

    #[test]
    fn test_zero_minimum_has_no_lower_band() {
        assert_eq!(classify("Triglycerides", 0.0), RiskTier::Normal);
        assert_eq!(classify("Triglycerides", 1.0), RiskTier::Normal);
        assert_eq!(classify("Triglycerides", -1.0), RiskTier::Critical);
    }

    #[test]
    fn test_unknown_test_defaults_to_normal() {
        assert_eq!(classify("Unobtainium", 1_000_000.0), RiskTier::Normal);
        assert_eq!(classify("", -5.0), RiskTier::Normal);
    }

    #[test]
    fn test_boundaries_are_never_high_or_low() {
        for range in reference::REFERENCE_RANGES.iter() {
            for value in [range.min, range.max] {
                let tier = classify_against(range, value);
                assert!(
                    tier != RiskTier::High && tier != RiskTier::Low,
                    "{} at {} classified as {}",
                    range.test_key,
                    value,
                    tier
                );
            }
        }
    }

    #[test]
    fn test_critical_takes_precedence() {
        for range in reference::REFERENCE_RANGES.iter() {
            let above = range.max * CRITICAL_HIGH_FACTOR + 0.5;
            assert_eq!(classify_against(range, above), RiskTier::Critical);

            let below = range.min * CRITICAL_LOW_FACTOR - 0.5;
            assert_eq!(classify_against(range, below), RiskTier::Critical);
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        let samples = [0.0, 35.0, 69.99, 70.0, 95.0, 100.0, 150.0, 200.0, 250.0];
        for value in samples {
            let first = classify("Glucose", value);
            for _ in 0..10 {
                assert_eq!(classify("Glucose", value), first);
            }
        }
    }
}
