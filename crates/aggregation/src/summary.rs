use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockpulse_core::ValueObject;

/// Grouping dimension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Category,
    Location,
    Supplier,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Category => "category",
            Dimension::Location => "location",
            Dimension::Supplier => "supplier",
        }
    }
}

/// Key of one group (the category/location/supplier id as text).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionKey(String);

impl DimensionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for DimensionKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Aggregated totals for one grouping key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionSummary {
    pub key: DimensionKey,
    pub count: u64,
    pub total_quantity: u64,
    /// Σ quantity × cost price, in cents.
    pub total_value: u64,
    pub low_stock_count: u64,
    pub out_of_stock_count: u64,
    /// `count / capacity` with capacity guarded to be at least 1.
    pub utilization: f64,
}

impl ValueObject for DimensionSummary {}

impl DimensionSummary {
    pub fn empty(key: DimensionKey) -> Self {
        Self {
            key,
            count: 0,
            total_quantity: 0,
            total_value: 0,
            low_stock_count: 0,
            out_of_stock_count: 0,
            utilization: 0.0,
        }
    }

    pub fn metric(&self, metric: SummaryMetric) -> f64 {
        match metric {
            SummaryMetric::TotalValue => self.total_value as f64,
            SummaryMetric::Count => self.count as f64,
            SummaryMetric::Quantity => self.total_quantity as f64,
            SummaryMetric::LowStock => self.low_stock_count as f64,
            SummaryMetric::OutOfStock => self.out_of_stock_count as f64,
            SummaryMetric::Utilization => self.utilization,
        }
    }
}

/// Which summary field a ranked or charted view reads.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryMetric {
    #[default]
    TotalValue,
    Count,
    Quantity,
    LowStock,
    OutOfStock,
    Utilization,
}

/// Top-N groups by `metric`, descending; ties broken by ascending key.
pub fn top_n(
    summaries: &BTreeMap<DimensionKey, DimensionSummary>,
    n: usize,
    metric: SummaryMetric,
) -> Vec<&DimensionSummary> {
    let mut ranked: Vec<&DimensionSummary> = summaries.values().collect();
    ranked.sort_by(|a, b| {
        b.metric(metric)
            .total_cmp(&a.metric(metric))
            .then_with(|| a.key.cmp(&b.key))
    });
    ranked.truncate(n);
    ranked
}

/// Dashboard-wide KPI totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryOverview {
    pub total_items: u64,
    pub total_quantity: u64,
    pub total_value: u64,
    pub low_stock_count: u64,
    pub out_of_stock_count: u64,
    /// Mean profit margin over items with a selling price; 0 when there are none.
    pub average_margin: f64,
}

impl ValueObject for InventoryOverview {}
