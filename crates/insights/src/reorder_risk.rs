use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use stockpulse_forecast::{ForecastEngine, ForecastPolicy, RiskLevel};
use stockpulse_inventory::InventorySnapshot;

use crate::job::InsightJob;
use crate::result::{InsightError, InsightResult};

/// One item flagged by [`ReorderRiskJob`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtRiskItem {
    pub item_id: String,
    pub risk_level: RiskLevel,
    pub recommendation: String,
    pub explanation: String,
}

/// Flags items whose forecast risk is at least `min_risk`.
///
/// Model:
/// - Forecast every item over `horizon_days` with the linear depletion engine.
/// - Keep records at or above `min_risk`, most urgent first.
/// - Confidence is the mean forecast confidence of the flagged items.
#[derive(Debug, Clone)]
pub struct ReorderRiskJob {
    input: Arc<InventorySnapshot>,
    horizon_days: u32,
    min_risk: RiskLevel,
    policy: ForecastPolicy,
}

impl ReorderRiskJob {
    pub const KIND: &'static str = "inventory.reorder_risk";

    pub fn new(input: Arc<InventorySnapshot>) -> Self {
        Self {
            input,
            horizon_days: 14,
            min_risk: RiskLevel::High,
            policy: ForecastPolicy::default(),
        }
    }

    pub fn with_horizon(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    pub fn with_min_risk(mut self, min_risk: RiskLevel) -> Self {
        self.min_risk = min_risk;
        self
    }

    pub fn with_policy(mut self, policy: ForecastPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl InsightJob for ReorderRiskJob {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn run(&self) -> Result<InsightResult, InsightError> {
        if self.horizon_days == 0 {
            return Err(InsightError::InvalidInput("horizon must be at least one day".to_string()));
        }

        let engine = ForecastEngine::new(self.policy.clone());
        let flagged: Vec<_> = engine
            .forecast_all(self.input.items(), self.horizon_days)
            .into_iter()
            .filter(|record| record.risk_level >= self.min_risk)
            .collect();

        let confidence = if flagged.is_empty() {
            1.0
        } else {
            flagged.iter().map(|r| r.confidence_score).sum::<f64>() / flagged.len() as f64
        };

        let at_risk: Vec<AtRiskItem> = flagged
            .iter()
            .map(|record| {
                let days = record
                    .days_until_reorder
                    .days()
                    .map(|d| format!("{d} day(s)"))
                    .unwrap_or_else(|| "no reorder needed".to_string());
                AtRiskItem {
                    item_id: record.item_id.to_string(),
                    risk_level: record.risk_level,
                    recommendation: record.recommendation.to_string(),
                    explanation: format!(
                        "item {} has {} units, uses {:.2}/day; reorder point in {days}",
                        record.item_id, record.current_stock, record.daily_usage
                    ),
                }
            })
            .collect();

        let items = serde_json::to_value(&at_risk)?;

        Ok(InsightResult::new(Self::KIND, at_risk.len() as f64, confidence)
            .with_summary(format!(
                "{} item(s) at or above {} risk over a {}-day horizon",
                at_risk.len(),
                self.min_risk.as_str(),
                self.horizon_days
            ))
            .with_details(json!({
                "horizon_days": self.horizon_days,
                "min_risk": self.min_risk,
                "items": items,
            })))
    }
}
