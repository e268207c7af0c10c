//! Risk tier classification for lab results.
//!
//! `High` and `Low` are siblings, not magnitudes, so the enum has no ordering.
//! Consumers match exhaustively; a new tier must be handled everywhere.

use serde::{Deserialize, Serialize};

/// Discrete risk tier assigned to a single lab value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    /// Comfortably inside the reference range
    Normal,
    /// Inside the range but within 10% of a boundary
    Borderline,
    /// Above the reference range
    High,
    /// Below the reference range
    Low,
    /// Below half the minimum or above twice the maximum
    Critical,
}

impl RiskTier {
    /// All tiers, in presentation order.
    pub const ALL: [RiskTier; 5] = [
        Self::Normal,
        Self::Borderline,
        Self::High,
        Self::Low,
        Self::Critical,
    ];

    /// Human-readable label, also used verbatim in the assistant context.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Borderline => "Borderline",
            Self::High => "High",
            Self::Low => "Low",
            Self::Critical => "Critical",
        }
    }

    /// Whether the tier is outside the reference range.
    #[must_use]
    pub fn is_abnormal(&self) -> bool {
        match self {
            Self::High | Self::Low | Self::Critical => true,
            Self::Normal | Self::Borderline => false,
        }
    }

    /// Indicator glyph prefixed to each context line.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Normal => "✅",
            Self::Borderline => "⚠️",
            Self::High => "🔴",
            Self::Low => "🔵",
            Self::Critical => "🚨",
        }
    }

    /// Indicator color for the presentation layer (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Normal => (56, 142, 60),             // Green (#388E3C)
            Self::Borderline => (255, 160, 0),         // Amber (#FFA000)
            Self::High | Self::Low => (211, 47, 47),   // Red (#D32F2F)
            Self::Critical => (123, 31, 162),          // Purple (#7B1FA2)
        }
    }

    /// Indicator color as a `#RRGGBB` hex string.
    #[must_use]
    pub fn color_hex(&self) -> String {
        let (r, g, b) = self.color();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abnormal_grouping() {
        assert!(!RiskTier::Normal.is_abnormal());
        assert!(!RiskTier::Borderline.is_abnormal());
        assert!(RiskTier::High.is_abnormal());
        assert!(RiskTier::Low.is_abnormal());
        assert!(RiskTier::Critical.is_abnormal());
    }

    #[test]
    fn test_indicator_colors() {
        assert_eq!(RiskTier::Normal.color_hex(), "#388E3C");
        assert_eq!(RiskTier::Borderline.color_hex(), "#FFA000");
        assert_eq!(RiskTier::High.color(), RiskTier::Low.color());
        assert_eq!(RiskTier::Critical.color_hex(), "#7B1FA2");
    }

    #[test]
    fn test_display_matches_label() {
        for tier in RiskTier::ALL {
            assert_eq!(tier.to_string(), tier.label());
        }
    }

    #[test]
    fn test_serde_uses_variant_names() {
        let json = serde_json::to_string(&RiskTier::Borderline).expect("serialize");
        assert_eq!(json, "\"Borderline\"");
    }
}
