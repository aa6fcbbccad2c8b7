use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use stockpulse_aggregation::{Dimension, SummaryMetric};
use stockpulse_charts::ChartType;
use stockpulse_core::{CategoryId, LocationId, PaletteId, SupplierId};
use stockpulse_heatmap::HeatmapMetric;
use stockpulse_inventory::{InventoryItem, InventorySnapshot, StockStatus};

/// Item predicate applied before any aggregation. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFilter {
    pub category: Option<CategoryId>,
    pub location: Option<LocationId>,
    pub supplier: Option<SupplierId>,
    pub status: Option<StockStatus>,
}

impl ItemFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.location.is_none() && self.supplier.is_none() && self.status.is_none()
    }

    pub fn matches(&self, item: &InventoryItem) -> bool {
        self.category.as_ref().is_none_or(|c| item.category() == c)
            && self.location.as_ref().is_none_or(|l| item.location() == l)
            && self.supplier.as_ref().is_none_or(|s| item.supplier() == s)
            && self.status.is_none_or(|s| item.status() == s)
    }

    /// Snapshot restricted to matching items; locations are kept whole.
    pub fn apply<'a>(&self, snapshot: &'a InventorySnapshot) -> Cow<'a, InventorySnapshot> {
        if self.is_empty() {
            return Cow::Borrowed(snapshot);
        }
        let items = snapshot.items().iter().filter(|item| self.matches(item)).cloned().collect();
        Cow::Owned(InventorySnapshot::new(items, snapshot.locations().to_vec()))
    }
}

/// Everything a single render depends on besides the data itself.
///
/// Immutable: the `with_*` methods return a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    pub theme: PaletteId,
    pub fullscreen: bool,
    pub filter: ItemFilter,
    pub show_grid: bool,
    pub show_labels: bool,
    pub chart_type: ChartType,
    pub chart_dimension: Dimension,
    pub chart_metric: SummaryMetric,
    pub heatmap_metric: HeatmapMetric,
    pub zoom: f64,
    pub horizon_days: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            theme: PaletteId::Default,
            fullscreen: false,
            filter: ItemFilter::default(),
            show_grid: true,
            show_labels: true,
            chart_type: ChartType::Pie,
            chart_dimension: Dimension::Category,
            chart_metric: SummaryMetric::TotalValue,
            heatmap_metric: HeatmapMetric::ItemCount,
            zoom: 1.0,
            horizon_days: 14,
        }
    }
}

impl ViewConfig {
    pub fn with_theme(mut self, theme: PaletteId) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn with_filter(mut self, filter: ItemFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    pub fn with_labels(mut self, show_labels: bool) -> Self {
        self.show_labels = show_labels;
        self
    }

    pub fn with_chart(mut self, chart_type: ChartType, dimension: Dimension, metric: SummaryMetric) -> Self {
        self.chart_type = chart_type;
        self.chart_dimension = dimension;
        self.chart_metric = metric;
        self
    }

    pub fn with_heatmap_metric(mut self, metric: HeatmapMetric) -> Self {
        self.heatmap_metric = metric;
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_horizon(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use stockpulse_core::Entity;
    use stockpulse_inventory::ItemRecord;

    fn item(id: &str, category: &str, quantity: i64) -> InventoryItem {
        InventoryItem::from_record(ItemRecord {
            id: id.to_string(),
            name: id.to_uppercase(),
            category: category.to_string(),
            location: "A1".to_string(),
            supplier: "acme".to_string(),
            quantity,
            min_stock: 5,
            max_stock: 100,
            cost_price: 100,
            selling_price: 150,
            daily_usage_rate: 1.0,
            lead_time_days: 3,
            last_updated: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        })
        .unwrap()
    }

    #[test]
    fn builders_leave_the_original_untouched() {
        let base = ViewConfig::default();
        let zoomed = base.clone().with_zoom(2.0).with_theme(PaletteId::Dark);
        assert_eq!(base.zoom, 1.0);
        assert_eq!(zoomed.zoom, 2.0);
        assert_eq!(zoomed.theme, PaletteId::Dark);
    }

    #[test]
    fn empty_filter_borrows_the_snapshot() {
        let snapshot = InventorySnapshot::new(vec![item("a", "tools", 10)], vec![]);
        assert!(matches!(ItemFilter::default().apply(&snapshot), Cow::Borrowed(_)));
    }

    #[test]
    fn filter_combines_fields() {
        let snapshot = InventorySnapshot::new(
            vec![item("a", "tools", 10), item("b", "tools", 0), item("c", "paint", 0)],
            vec![],
        );
        let filter = ItemFilter {
            category: Some(CategoryId::new("tools").unwrap()),
            status: Some(StockStatus::OutOfStock),
            ..ItemFilter::default()
        };
        let scoped = filter.apply(&snapshot);
        let ids: Vec<_> = scoped.items().iter().map(|i| i.id().as_str().to_string()).collect();
        assert_eq!(ids, vec!["b".to_string()]);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let view: ViewConfig = serde_json::from_str(r#"{"chartType":"bar","zoom":2.5}"#).unwrap();
        assert_eq!(view.chart_type, ChartType::Bar);
        assert_eq!(view.zoom, 2.5);
        assert!(view.show_grid);
    }
}
