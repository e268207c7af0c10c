//! Insight summaries: tier counts over a set of results.

use serde::{Deserialize, Serialize};

use crate::domain::{ResultRecord, RiskTier};

/// Tier counts for the quick-insights widgets.
///
/// `abnormal` counts exactly `High` and `Low`; `Critical` results are counted
/// only in `critical`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickInsights {
    pub normal: usize,
    pub borderline: usize,
    pub abnormal: usize,
    pub critical: usize,
}

impl QuickInsights {
    /// Sum of all counters; always equals the number of summarized records.
    #[must_use]
    pub fn total(&self) -> usize {
        self.normal + self.borderline + self.abnormal + self.critical
    }

    #[must_use]
    pub fn has_critical(&self) -> bool {
        self.critical > 0
    }

    fn add(&mut self, tier: RiskTier) {
        match tier {
            RiskTier::Normal => self.normal += 1,
            RiskTier::Borderline => self.borderline += 1,
            RiskTier::High | RiskTier::Low => self.abnormal += 1,
            RiskTier::Critical => self.critical += 1,
        }
    }
}

/// Count records per tier group.
#[must_use]
pub fn summarize(records: &[ResultRecord]) -> QuickInsights {
    records
        .iter()
        .fold(QuickInsights::default(), |mut insights, record| {
            insights.add(record.tier());
            insights
        })
}
