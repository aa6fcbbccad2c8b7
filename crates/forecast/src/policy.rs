use serde::{Deserialize, Serialize};

use crate::record::RiskLevel;

/// Day thresholds (inclusive) for each risk level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskThresholds {
    pub critical_days: u32,
    pub high_days: u32,
    pub medium_days: u32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            critical_days: 2,
            high_days: 5,
            medium_days: 10,
        }
    }
}

impl RiskThresholds {
    pub fn classify(&self, days_until_reorder: u32) -> RiskLevel {
        if days_until_reorder <= self.critical_days {
            RiskLevel::Critical
        } else if days_until_reorder <= self.high_days {
            RiskLevel::High
        } else if days_until_reorder <= self.medium_days {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Confidence assigned to items whose daily usage is at most `max_daily_usage`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceTier {
    pub max_daily_usage: f64,
    pub score: f64,
}

/// Tunable constants of the forecast model.
///
/// The confidence score is a variance proxy: slow movers are assumed to have
/// steadier consumption than fast movers. It is not a statistical estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPolicy {
    pub thresholds: RiskThresholds,
    /// Days after lead time during which ordering should be planned.
    pub planning_window_days: u32,
    /// Ascending by `max_daily_usage`.
    pub confidence_tiers: Vec<ConfidenceTier>,
    /// Score for usage above every tier.
    pub fallback_confidence: f64,
}

impl Default for ForecastPolicy {
    fn default() -> Self {
        Self {
            thresholds: RiskThresholds::default(),
            planning_window_days: 3,
            confidence_tiers: vec![
                ConfidenceTier { max_daily_usage: 1.0, score: 0.95 },
                ConfidenceTier { max_daily_usage: 5.0, score: 0.90 },
                ConfidenceTier { max_daily_usage: 20.0, score: 0.80 },
            ],
            fallback_confidence: 0.70,
        }
    }
}

impl ForecastPolicy {
    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_planning_window(mut self, days: u32) -> Self {
        self.planning_window_days = days;
        self
    }

    pub fn confidence_for(&self, daily_usage: f64) -> f64 {
        self.confidence_tiers
            .iter()
            .find(|tier| daily_usage <= tier.max_daily_usage)
            .map(|tier| tier.score)
            .unwrap_or(self.fallback_confidence)
            .clamp(0.0, 1.0)
    }
}
