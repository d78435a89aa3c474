//! Motivation tiers and the scored response

use serde::{Deserialize, Serialize};

/// Scores below this are LOW
pub const MODERATE_THRESHOLD: f64 = 30.0;
/// Scores at or above this are HIGH
pub const HIGH_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotivationTier {
    Low,
    Moderate,
    High,
}

impl MotivationTier {
    /// Classify a (rounded) score; lower bounds are inclusive
    pub fn from_score(score: f64) -> Self {
        if score < MODERATE_THRESHOLD {
            MotivationTier::Low
        } else if score < HIGH_THRESHOLD {
            MotivationTier::Moderate
        } else {
            MotivationTier::High
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            MotivationTier::Low => "Great going! Keep up your healthy habits.",
            MotivationTier::Moderate => {
                "You're on the edge — add a little more movement and mindful eating."
            }
            MotivationTier::High => {
                "Prioritize your heart — consult a doctor and make small daily changes."
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MotivationTier::Low => "low",
            MotivationTier::Moderate => "moderate",
            MotivationTier::High => "high",
        }
    }
}

impl std::fmt::Display for MotivationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized result for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    /// 0.00 - 100.00, two decimals
    pub score: f64,
    pub tier: MotivationTier,
    pub message: String,
}

impl RiskScore {
    pub fn new(score: f64) -> Self {
        let tier = MotivationTier::from_score(score);
        Self {
            score,
            tier,
            message: tier.message().to_string(),
        }
    }
}
