use std::collections::BTreeMap;

use stockpulse_inventory::{InventoryItem, StockStatus};

use crate::capacity::CapacityTable;
use crate::summary::{Dimension, DimensionKey, DimensionSummary, InventoryOverview};

/// Aggregation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Capacity used for keys with no registered capacity (guarded to >= 1).
    pub default_capacity: u32,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self { default_capacity: 100 }
    }
}

impl AggregationConfig {
    pub fn with_default_capacity(mut self, default_capacity: u32) -> Self {
        self.default_capacity = default_capacity;
        self
    }
}

/// Single-pass grouping of items into per-key summaries.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregationConfig,
    capacities: CapacityTable,
}

fn key_of(item: &InventoryItem, dimension: Dimension) -> DimensionKey {
    match dimension {
        Dimension::Category => DimensionKey::new(item.category().as_str()),
        Dimension::Location => DimensionKey::new(item.location().as_str()),
        Dimension::Supplier => DimensionKey::new(item.supplier().as_str()),
    }
}

impl Aggregator {
    pub fn new(config: AggregationConfig, capacities: CapacityTable) -> Self {
        Self { config, capacities }
    }

    pub fn capacities(&self) -> &CapacityTable {
        &self.capacities
    }

    fn capacity_for(&self, dimension: Dimension, key: &DimensionKey) -> u32 {
        self.capacities
            .get(dimension, key)
            .unwrap_or(self.config.default_capacity)
            .max(1)
    }

    /// Group `items` by `dimension`.
    ///
    /// Keys registered in the capacity table are always present; with no items
    /// they carry an all-zero summary.
    pub fn aggregate(&self, items: &[InventoryItem], dimension: Dimension) -> BTreeMap<DimensionKey, DimensionSummary> {
        let mut groups: BTreeMap<DimensionKey, DimensionSummary> = self
            .capacities
            .keys(dimension)
            .map(|key| (key.clone(), DimensionSummary::empty(key.clone())))
            .collect();

        for item in items {
            let key = key_of(item, dimension);
            let summary = groups
                .entry(key.clone())
                .or_insert_with(|| DimensionSummary::empty(key));
            summary.count += 1;
            summary.total_quantity = summary.total_quantity.saturating_add(item.quantity());
            summary.total_value = summary.total_value.saturating_add(item.total_value());
            match item.status() {
                StockStatus::LowStock => summary.low_stock_count += 1,
                StockStatus::OutOfStock => summary.out_of_stock_count += 1,
                StockStatus::InStock => {}
            }
        }

        for summary in groups.values_mut() {
            let capacity = self.capacity_for(dimension, &summary.key);
            summary.utilization = summary.count as f64 / capacity as f64;
        }

        tracing::debug!(
            dimension = dimension.as_str(),
            items = items.len(),
            groups = groups.len(),
            "aggregated inventory"
        );
        groups
    }

    /// Dashboard-wide totals across all items.
    pub fn overview(&self, items: &[InventoryItem]) -> InventoryOverview {
        let mut overview = InventoryOverview {
            total_items: 0,
            total_quantity: 0,
            total_value: 0,
            low_stock_count: 0,
            out_of_stock_count: 0,
            average_margin: 0.0,
        };
        let mut margin_sum = 0.0;
        let mut priced = 0u64;

        for item in items {
            overview.total_items += 1;
            overview.total_quantity = overview.total_quantity.saturating_add(item.quantity());
            overview.total_value = overview.total_value.saturating_add(item.total_value());
            match item.status() {
                StockStatus::LowStock => overview.low_stock_count += 1,
                StockStatus::OutOfStock => overview.out_of_stock_count += 1,
                StockStatus::InStock => {}
            }
            if item.selling_price() > 0 {
                margin_sum += item.profit_margin();
                priced += 1;
            }
        }

        if priced > 0 {
            overview.average_margin = margin_sum / priced as f64;
        }
        overview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{SummaryMetric, top_n};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use stockpulse_inventory::ItemRecord;

    fn item(id: &str, category: &str, location: &str, quantity: i64, cost: i64) -> InventoryItem {
        InventoryItem::from_record(ItemRecord {
            id: id.to_string(),
            name: id.to_string(),
            category: category.to_string(),
            location: location.to_string(),
            supplier: "ACME".to_string(),
            quantity,
            min_stock: 5,
            max_stock: 0,
            cost_price: cost,
            selling_price: cost * 2,
            daily_usage_rate: 1.0,
            lead_time_days: 3,
            last_updated: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        })
        .unwrap()
    }

    #[test]
    fn groups_by_category_with_value_and_status_counts() {
        let items = vec![
            item("A", "tools", "WH-1", 10, 100),
            item("B", "tools", "WH-1", 3, 100),
            item("C", "paint", "WH-2", 0, 50),
        ];
        let out = Aggregator::default().aggregate(&items, Dimension::Category);

        let tools = &out[&DimensionKey::new("tools")];
        assert_eq!(tools.count, 2);
        assert_eq!(tools.total_value, 1_300);
        assert_eq!(tools.low_stock_count, 1);
        assert_eq!(tools.out_of_stock_count, 0);

        let paint = &out[&DimensionKey::new("paint")];
        assert_eq!(paint.out_of_stock_count, 1);
        assert_eq!(paint.total_value, 0);
    }

    #[test]
    fn utilization_uses_registered_capacity_and_guards_zero() {
        let capacities = CapacityTable::new()
            .with_capacity(Dimension::Location, "WH-1", 4)
            .with_capacity(Dimension::Location, "WH-2", 0);
        let aggregator = Aggregator::new(AggregationConfig::default(), capacities);
        let items = vec![item("A", "tools", "WH-1", 1, 1), item("B", "tools", "WH-2", 1, 1)];
        let out = aggregator.aggregate(&items, Dimension::Location);

        assert!((out[&DimensionKey::new("WH-1")].utilization - 0.25).abs() < 1e-12);
        assert!((out[&DimensionKey::new("WH-2")].utilization - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_yields_zero_summaries_for_known_keys() {
        let capacities = CapacityTable::new().with_capacity(Dimension::Location, "WH-9", 10);
        let aggregator = Aggregator::new(AggregationConfig::default(), capacities);
        let out = aggregator.aggregate(&[], Dimension::Location);
        assert_eq!(out.len(), 1);
        assert_eq!(out[&DimensionKey::new("WH-9")], DimensionSummary::empty(DimensionKey::new("WH-9")));

        assert!(Aggregator::default().aggregate(&[], Dimension::Supplier).is_empty());
    }

    #[test]
    fn top_n_breaks_ties_by_ascending_key() {
        let items = vec![
            item("A", "zeta", "WH-1", 10, 10),
            item("B", "alpha", "WH-1", 10, 10),
            item("C", "mid", "WH-1", 20, 10),
        ];
        let out = Aggregator::default().aggregate(&items, Dimension::Category);
        let ranked: Vec<&str> = top_n(&out, 3, SummaryMetric::TotalValue)
            .iter()
            .map(|s| s.key.as_str())
            .collect();
        assert_eq!(ranked, vec!["mid", "alpha", "zeta"]);
        assert_eq!(top_n(&out, 1, SummaryMetric::TotalValue).len(), 1);
    }

    #[test]
    fn overview_counts_statuses_and_margin() {
        let items = vec![item("A", "t", "W", 10, 100), item("B", "t", "W", 0, 100)];
        let overview = Aggregator::default().overview(&items);
        assert_eq!(overview.total_items, 2);
        assert_eq!(overview.total_value, 1_000);
        assert_eq!(overview.out_of_stock_count, 1);
        assert!((overview.average_margin - 0.5).abs() < 1e-12);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: grouping preserves the item count and total value.
        #[test]
        fn grouping_preserves_totals(
            rows in prop::collection::vec((0usize..4, 0i64..1_000, 0i64..10_000), 0..40)
        ) {
            let categories = ["a", "b", "c", "d"];
            let items: Vec<InventoryItem> = rows
                .iter()
                .enumerate()
                .map(|(i, (c, q, cost))| item(&format!("SKU-{i}"), categories[*c], "WH", *q, *cost))
                .collect();
            let out = Aggregator::default().aggregate(&items, Dimension::Category);

            let count: u64 = out.values().map(|s| s.count).sum();
            let value: u64 = out.values().map(|s| s.total_value).sum();
            prop_assert_eq!(count, items.len() as u64);
            prop_assert_eq!(value, items.iter().map(|i| i.total_value()).sum::<u64>());
        }
    }
}
