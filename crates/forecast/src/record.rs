use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockpulse_core::{ItemId, ValueObject};

/// Urgency to reorder. Ordered so that `Critical` is the greatest.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Days until stock reaches the reorder point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "days", rename_all = "kebab-case")]
pub enum DaysUntilReorder {
    Days(u32),
    /// The item is not being consumed.
    NotNeeded,
}

impl DaysUntilReorder {
    pub fn days(&self) -> Option<u32> {
        match self {
            DaysUntilReorder::Days(d) => Some(*d),
            DaysUntilReorder::NotNeeded => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Recommendation {
    OrderImmediately,
    PlanWithin { days: u32 },
    Monitor,
}

impl core::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Recommendation::OrderImmediately => f.write_str("order immediately"),
            Recommendation::PlanWithin { days } => write!(f, "plan within {days} days"),
            Recommendation::Monitor => f.write_str("monitor"),
        }
    }
}

/// Spread around the projected stock, derived from the confidence score.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ProjectionBand {
    pub lower: f64,
    pub upper: f64,
}

/// Projected stock state and risk classification for one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecord {
    pub item_id: ItemId,
    pub horizon_days: u32,
    pub current_stock: u64,
    pub min_stock: u64,
    pub daily_usage: f64,
    /// `max(0, current − usage × horizon)`.
    pub projected_stock: f64,
    pub confidence_band: ProjectionBand,
    pub days_until_reorder: DaysUntilReorder,
    pub days_until_stockout: Option<u32>,
    pub risk_level: RiskLevel,
    pub confidence_score: f64,
    pub recommendation: Recommendation,
    pub reorder_date: Option<NaiveDate>,
    pub predicted_shortage: bool,
    /// Days until projected stock first drops below `min_stock`, when a
    /// shortage is predicted within the horizon.
    pub shortage_days: Option<u32>,
}

impl ValueObject for ForecastRecord {}
