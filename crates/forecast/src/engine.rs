use chrono::Days;

use stockpulse_core::Entity;
use stockpulse_inventory::InventoryItem;

use crate::policy::ForecastPolicy;
use crate::record::{DaysUntilReorder, ForecastRecord, ProjectionBand, Recommendation, RiskLevel};

/// Whole days until `stock` drops to `threshold` at `usage` per day.
///
/// Callers guarantee `usage > 0`. Already at or below the threshold is 0.
fn days_to_reach(stock: u64, threshold: u64, usage: f64) -> u32 {
    if stock <= threshold {
        return 0;
    }
    let days = ((stock - threshold) as f64 / usage).floor();
    if days >= u32::MAX as f64 { u32::MAX } else { days as u32 }
}

#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    policy: ForecastPolicy,
}

impl ForecastEngine {
    pub fn new(policy: ForecastPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ForecastPolicy {
        &self.policy
    }

    /// Project `item` over `horizon_days`.
    pub fn forecast(&self, item: &InventoryItem, horizon_days: u32) -> ForecastRecord {
        let current = item.quantity();
        let min_stock = item.min_stock();
        let usage = item.daily_usage_rate();
        let consuming = usage > 0.0;

        let projected_stock = (current as f64 - usage * horizon_days as f64).max(0.0);
        let confidence_score = self.policy.confidence_for(usage);
        let spread = usage * horizon_days as f64 * (1.0 - confidence_score);
        let confidence_band = ProjectionBand {
            lower: (projected_stock - spread).max(0.0),
            upper: (projected_stock + spread).min(current as f64),
        };

        let days_until_reorder = if consuming {
            DaysUntilReorder::Days(days_to_reach(current, min_stock, usage))
        } else {
            DaysUntilReorder::NotNeeded
        };
        let days_until_stockout = consuming.then(|| days_to_reach(current, 0, usage));

        let (risk_level, recommendation) = match days_until_reorder {
            DaysUntilReorder::Days(days) => (self.policy.thresholds.classify(days), self.recommend(item, days)),
            DaysUntilReorder::NotNeeded => (RiskLevel::Low, Recommendation::Monitor),
        };

        let reorder_date = days_until_reorder
            .days()
            .and_then(|days| item.last_updated().date_naive().checked_add_days(Days::new(u64::from(days))));

        let predicted_shortage = projected_stock < min_stock as f64;
        let shortage_days = if predicted_shortage && consuming {
            Some(if current < min_stock {
                0
            } else {
                days_to_reach(current, min_stock, usage).saturating_add(1)
            })
        } else if predicted_shortage {
            Some(0)
        } else {
            None
        };

        tracing::debug!(
            item_id = item.id().as_str(),
            horizon_days,
            projected_stock,
            risk = risk_level.as_str(),
            "forecast computed"
        );

        ForecastRecord {
            item_id: item.id().clone(),
            horizon_days,
            current_stock: current,
            min_stock,
            daily_usage: usage,
            projected_stock,
            confidence_band,
            days_until_reorder,
            days_until_stockout,
            risk_level,
            confidence_score,
            recommendation,
            reorder_date,
            predicted_shortage,
            shortage_days,
        }
    }

    fn recommend(&self, item: &InventoryItem, days_until_reorder: u32) -> Recommendation {
        let lead = item.lead_time_days();
        let window = self.policy.planning_window_days;
        if days_until_reorder <= lead {
            Recommendation::OrderImmediately
        } else if days_until_reorder < lead.saturating_add(window) {
            Recommendation::PlanWithin { days: window }
        } else {
            Recommendation::Monitor
        }
    }

    /// Forecast every item; most urgent first, ties by item id.
    pub fn forecast_all<'a>(
        &self,
        items: impl IntoIterator<Item = &'a InventoryItem>,
        horizon_days: u32,
    ) -> Vec<ForecastRecord> {
        let mut records: Vec<ForecastRecord> = items
            .into_iter()
            .map(|item| self.forecast(item, horizon_days))
            .collect();
        records.sort_by(|a, b| b.risk_level.cmp(&a.risk_level).then_with(|| a.item_id.cmp(&b.item_id)));
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RiskThresholds;
    use chrono::{NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;
    use stockpulse_inventory::ItemRecord;

    fn item(id: &str, quantity: i64, min_stock: i64, usage: f64, lead: u32) -> InventoryItem {
        InventoryItem::from_record(ItemRecord {
            id: id.to_string(),
            name: id.to_string(),
            category: "c".to_string(),
            location: "l".to_string(),
            supplier: "s".to_string(),
            quantity,
            min_stock,
            max_stock: 0,
            cost_price: 100,
            selling_price: 150,
            daily_usage_rate: usage,
            lead_time_days: lead,
            last_updated: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        })
        .unwrap()
    }

    #[test]
    fn medium_risk_item_is_monitored() {
        let record = ForecastEngine::default().forecast(&item("A", 100, 20, 10.0, 5), 7);
        assert_eq!(record.days_until_reorder, DaysUntilReorder::Days(8));
        assert_eq!(record.risk_level, RiskLevel::Medium);
        assert_eq!(record.recommendation, Recommendation::Monitor);
        assert_eq!(record.recommendation.to_string(), "monitor");
        assert_eq!(record.reorder_date, NaiveDate::from_ymd_opt(2024, 3, 9));
        assert_eq!(record.days_until_stockout, Some(10));
    }

    #[test]
    fn projection_clamps_at_zero_and_predicts_shortage() {
        let record = ForecastEngine::default().forecast(&item("A", 100, 20, 10.0, 5), 30);
        assert_eq!(record.projected_stock, 0.0);
        assert!(record.predicted_shortage);
        assert_eq!(record.shortage_days, Some(9));
        assert_eq!(record.confidence_band.lower, 0.0);
    }

    #[test]
    fn zero_usage_needs_no_reorder() {
        let record = ForecastEngine::default().forecast(&item("A", 50, 20, 0.0, 5), 30);
        assert_eq!(record.days_until_reorder, DaysUntilReorder::NotNeeded);
        assert_eq!(record.days_until_reorder.days(), None);
        assert_eq!(record.risk_level, RiskLevel::Low);
        assert_eq!(record.recommendation, Recommendation::Monitor);
        assert_eq!(record.reorder_date, None);
        assert_eq!(record.projected_stock, 50.0);
        assert!(!record.predicted_shortage);
    }

    #[test]
    fn stock_below_reorder_point_is_critical_now() {
        let record = ForecastEngine::default().forecast(&item("A", 10, 20, 2.0, 4), 5);
        assert_eq!(record.days_until_reorder, DaysUntilReorder::Days(0));
        assert_eq!(record.risk_level, RiskLevel::Critical);
        assert_eq!(record.recommendation, Recommendation::OrderImmediately);
        assert_eq!(record.shortage_days, Some(0));
    }

    #[test]
    fn planning_window_follows_lead_time() {
        // (40 - 20) / 2 = 10 days; lead 8 + window 3 = 11.
        let record = ForecastEngine::default().forecast(&item("A", 40, 20, 2.0, 8), 5);
        assert_eq!(record.recommendation, Recommendation::PlanWithin { days: 3 });
        assert_eq!(record.recommendation.to_string(), "plan within 3 days");
    }

    #[test]
    fn thresholds_are_configurable() {
        let policy = ForecastPolicy::default().with_thresholds(RiskThresholds {
            critical_days: 8,
            high_days: 9,
            medium_days: 10,
        });
        let record = ForecastEngine::new(policy).forecast(&item("A", 100, 20, 10.0, 5), 7);
        assert_eq!(record.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn confidence_is_higher_for_slow_movers() {
        let engine = ForecastEngine::default();
        let slow = engine.forecast(&item("A", 100, 0, 0.5, 1), 10);
        let fast = engine.forecast(&item("B", 100, 0, 50.0, 1), 10);
        assert!(slow.confidence_score > fast.confidence_score);
    }

    #[test]
    fn forecast_all_orders_by_urgency_then_id() {
        let items = vec![
            item("C", 100, 0, 0.0, 1),
            item("B", 10, 20, 1.0, 1),
            item("A", 10, 20, 1.0, 1),
        ];
        let records = ForecastEngine::default().forecast_all(&items, 7);
        let ids: Vec<&str> = records.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: identical item state and horizon produce identical output.
        #[test]
        fn forecast_is_deterministic(
            quantity in 0i64..10_000,
            min_stock in 0i64..500,
            usage in 0.0f64..200.0,
            lead in 0u32..60,
            horizon in 0u32..365,
        ) {
            let engine = ForecastEngine::default();
            let it = item("P", quantity, min_stock, usage, lead);
            let a = engine.forecast(&it, horizon);
            let b = engine.forecast(&it, horizon);
            prop_assert_eq!(&a, &b);
            prop_assert!(a.projected_stock >= 0.0);
            prop_assert!(a.confidence_band.lower <= a.projected_stock);
            prop_assert!(a.projected_stock <= a.confidence_band.upper);
        }
    }
}
