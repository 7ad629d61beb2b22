//! Risk classification of composite trust scores.
//!
//! Scores measure trustworthiness, so a higher score maps to a lower risk.

use crate::models::RiskLevel;

/// Lowest score classified as low risk
pub const LOW_RISK_THRESHOLD: u8 = 80;

/// Lowest score classified as medium risk
pub const MEDIUM_RISK_THRESHOLD: u8 = 60;

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= LOW_RISK_THRESHOLD => RiskLevel::Low,
            s if s >= MEDIUM_RISK_THRESHOLD => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_from_score() {
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(80), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(79), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0), RiskLevel::High);
    }

    #[test]
    fn test_risk_level_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::Medium).unwrap(),
            "\"MEDIUM\""
        );
        assert_eq!(RiskLevel::High.as_str(), "HIGH");
    }
}
