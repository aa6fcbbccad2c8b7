use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpulse_core::{CategoryId, DomainError, DomainResult, Entity, ItemId, LocationId, SupplierId};

/// Derived stock status.
///
/// Never stored: always computed from quantity against `min_stock` and zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn derive(quantity: u64, min_stock: u64) -> Self {
        if quantity == 0 {
            StockStatus::OutOfStock
        } else if quantity <= min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }
}

/// Raw item record as delivered by the external inventory store.
///
/// Numeric fields are signed/floating so that bad data can be observed and
/// clamped instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub category: String,
    pub location: String,
    pub supplier: String,
    pub quantity: i64,
    #[serde(default)]
    pub min_stock: i64,
    #[serde(default)]
    pub max_stock: i64,
    /// Cost per unit in cents.
    #[serde(default)]
    pub cost_price: i64,
    /// Selling price per unit in cents.
    #[serde(default)]
    pub selling_price: i64,
    #[serde(default)]
    pub daily_usage_rate: f64,
    #[serde(default)]
    pub lead_time_days: u32,
    pub last_updated: DateTime<Utc>,
}

/// System-of-record inventory item (read-only snapshot view).
///
/// `total_value` is maintained as `quantity × cost_price` by every mutator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    category: CategoryId,
    location: LocationId,
    supplier: SupplierId,
    quantity: u64,
    min_stock: u64,
    max_stock: u64,
    cost_price: u64,
    selling_price: u64,
    total_value: u64,
    daily_usage_rate: f64,
    lead_time_days: u32,
    last_updated: DateTime<Utc>,
}

fn clamp_non_negative(id: &str, field: &'static str, value: i64) -> u64 {
    if value < 0 {
        tracing::warn!(item_id = id, field, value, "negative value clamped to zero");
        0
    } else {
        value as u64
    }
}

impl InventoryItem {
    /// Validate identifiers and clamp out-of-range numbers from a raw record.
    pub fn from_record(record: ItemRecord) -> DomainResult<Self> {
        let id = ItemId::new(record.id)?;
        let category = CategoryId::new(record.category)?;
        let location = LocationId::new(record.location)?;
        let supplier = SupplierId::new(record.supplier)?;

        let quantity = clamp_non_negative(id.as_str(), "quantity", record.quantity);
        let min_stock = clamp_non_negative(id.as_str(), "minStock", record.min_stock);
        let max_stock = clamp_non_negative(id.as_str(), "maxStock", record.max_stock);
        let cost_price = clamp_non_negative(id.as_str(), "costPrice", record.cost_price);
        let selling_price = clamp_non_negative(id.as_str(), "sellingPrice", record.selling_price);

        let daily_usage_rate = if record.daily_usage_rate.is_finite() && record.daily_usage_rate >= 0.0 {
            record.daily_usage_rate
        } else {
            tracing::warn!(
                item_id = id.as_str(),
                value = record.daily_usage_rate,
                "invalid daily usage rate clamped to zero"
            );
            0.0
        };

        if max_stock > 0 && max_stock < min_stock {
            return Err(DomainError::invariant(format!(
                "item {id}: maxStock ({max_stock}) is below minStock ({min_stock})"
            )));
        }

        let mut item = Self {
            id,
            name: record.name,
            category,
            location,
            supplier,
            quantity,
            min_stock,
            max_stock,
            cost_price,
            selling_price,
            total_value: 0,
            daily_usage_rate,
            lead_time_days: record.lead_time_days,
            last_updated: record.last_updated,
        };
        item.recalculate_value();
        Ok(item)
    }

    fn recalculate_value(&mut self) {
        self.total_value = self.quantity.saturating_mul(self.cost_price);
    }

    pub fn set_quantity(&mut self, quantity: u64) {
        self.quantity = quantity;
        self.recalculate_value();
    }

    /// Apply a signed stock movement; stock never goes below zero.
    pub fn adjust_quantity(&mut self, delta: i64) {
        let next = if delta < 0 {
            self.quantity.saturating_sub(delta.unsigned_abs())
        } else {
            self.quantity.saturating_add(delta as u64)
        };
        self.set_quantity(next);
    }

    pub fn set_cost_price(&mut self, cost_price: u64) {
        self.cost_price = cost_price;
        self.recalculate_value();
    }

    pub fn set_selling_price(&mut self, selling_price: u64) {
        self.selling_price = selling_price;
    }

    pub fn status(&self) -> StockStatus {
        StockStatus::derive(self.quantity, self.min_stock)
    }

    /// `(selling − cost) / selling`; zero when there is no selling price.
    pub fn profit_margin(&self) -> f64 {
        if self.selling_price == 0 {
            return 0.0;
        }
        (self.selling_price as f64 - self.cost_price as f64) / self.selling_price as f64
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &CategoryId {
        &self.category
    }

    pub fn location(&self) -> &LocationId {
        &self.location
    }

    pub fn supplier(&self) -> &SupplierId {
        &self.supplier
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn min_stock(&self) -> u64 {
        self.min_stock
    }

    pub fn max_stock(&self) -> u64 {
        self.max_stock
    }

    pub fn cost_price(&self) -> u64 {
        self.cost_price
    }

    pub fn selling_price(&self) -> u64 {
        self.selling_price
    }

    pub fn total_value(&self) -> u64 {
        self.total_value
    }

    pub fn daily_usage_rate(&self) -> f64 {
        self.daily_usage_rate
    }

    pub fn lead_time_days(&self) -> u32 {
        self.lead_time_days
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn record(quantity: i64) -> ItemRecord {
        ItemRecord {
            id: "SKU-1".to_string(),
            name: "Widget".to_string(),
            category: "hardware".to_string(),
            location: "WH-A".to_string(),
            supplier: "ACME".to_string(),
            quantity,
            min_stock: 20,
            max_stock: 200,
            cost_price: 250,
            selling_price: 400,
            daily_usage_rate: 10.0,
            lead_time_days: 5,
            last_updated: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn total_value_is_quantity_times_cost() {
        let item = InventoryItem::from_record(record(100)).unwrap();
        assert_eq!(item.total_value(), 25_000);
    }

    #[test]
    fn mutators_recompute_total_value() {
        let mut item = InventoryItem::from_record(record(100)).unwrap();
        item.set_quantity(10);
        assert_eq!(item.total_value(), 2_500);
        item.set_cost_price(100);
        assert_eq!(item.total_value(), 1_000);
        item.adjust_quantity(-25);
        assert_eq!(item.quantity(), 0);
        assert_eq!(item.total_value(), 0);
    }

    #[test]
    fn status_is_derived_from_quantity() {
        let mut item = InventoryItem::from_record(record(100)).unwrap();
        assert_eq!(item.status(), StockStatus::InStock);
        item.set_quantity(20);
        assert_eq!(item.status(), StockStatus::LowStock);
        item.set_quantity(0);
        assert_eq!(item.status(), StockStatus::OutOfStock);
    }

    #[test]
    fn negative_quantity_is_clamped() {
        let item = InventoryItem::from_record(record(-7)).unwrap();
        assert_eq!(item.quantity(), 0);
        assert_eq!(item.status(), StockStatus::OutOfStock);
    }

    #[test]
    fn empty_id_is_rejected() {
        let mut r = record(1);
        r.id = " ".to_string();
        assert!(matches!(InventoryItem::from_record(r), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn inverted_stock_bounds_are_rejected() {
        let mut r = record(1);
        r.max_stock = 5;
        assert!(matches!(InventoryItem::from_record(r), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn profit_margin_guards_zero_selling_price() {
        let mut item = InventoryItem::from_record(record(1)).unwrap();
        assert!((item.profit_margin() - 0.375).abs() < 1e-12);
        item.set_selling_price(0);
        assert_eq!(item.profit_margin(), 0.0);
    }

    #[test]
    fn record_deserializes_from_camel_case_json() {
        let json = r#"{
            "id": "SKU-9", "category": "tools", "location": "WH-B", "supplier": "BOLT",
            "quantity": 3, "minStock": 5, "costPrice": 100, "dailyUsageRate": 1.5,
            "leadTimeDays": 2, "lastUpdated": "2024-03-01T00:00:00Z"
        }"#;
        let rec: ItemRecord = serde_json::from_str(json).unwrap();
        let item = InventoryItem::from_record(rec).unwrap();
        assert_eq!(item.status(), StockStatus::LowStock);
        assert_eq!(item.total_value(), 300);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after any sequence of movements, total value tracks quantity × cost.
        #[test]
        fn total_value_tracks_movements(deltas in prop::collection::vec(-500i64..500, 0..20)) {
            let mut item = InventoryItem::from_record(record(100)).unwrap();
            for d in deltas {
                item.adjust_quantity(d);
                prop_assert_eq!(item.total_value(), item.quantity() * item.cost_price());
                prop_assert_eq!(item.status(), StockStatus::derive(item.quantity(), item.min_stock()));
            }
        }
    }
}
