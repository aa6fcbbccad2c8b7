use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use stockpulse_aggregation::{
    Aggregator, CapacityTable, Dimension, DimensionKey, DimensionSummary, InventoryOverview,
    SummaryMetric, top_n,
};
use stockpulse_charts::{ChartEngine, ChartSeries, ChartType, RenderGeometry};
use stockpulse_core::{Palette, Rgb};
use stockpulse_forecast::{ForecastEngine, ForecastRecord, RiskLevel};
use stockpulse_heatmap::{GridSpec, HeatmapEngine, HeatmapGrid};
use stockpulse_insights::{
    AssistantContext, AssistantReply, InsightError, InsightResult, InsightScheduler, IntentClassifier, JobScope,
    LocalInsightScheduler, ReorderRiskJob, respond,
};
use stockpulse_inventory::InventorySnapshot;

use crate::coalesce::{RecomputeCoalescer, RecomputeTrigger};
use crate::config::DashboardConfig;
use crate::view::ViewConfig;

const TOP_GROUPS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPanel {
    pub chart_type: ChartType,
    pub dimension: Dimension,
    pub metric: SummaryMetric,
    pub geometry: RenderGeometry,
    /// Empty when labels are hidden.
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiPanel {
    #[serde(flatten)]
    pub overview: InventoryOverview,
    pub scan_accuracy_rate: f64,
    /// Items forecast at High or Critical risk.
    pub at_risk_count: usize,
    pub predicted_shortages: usize,
}

/// Everything one dashboard render produces. Shared read-only as `Arc<DashboardFrame>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFrame {
    pub view: ViewConfig,
    pub kpis: KpiPanel,
    pub by_category: BTreeMap<DimensionKey, DimensionSummary>,
    pub by_location: BTreeMap<DimensionKey, DimensionSummary>,
    pub by_supplier: BTreeMap<DimensionKey, DimensionSummary>,
    pub top_categories: Vec<DimensionSummary>,
    pub chart: ChartPanel,
    /// `None` when the grid is hidden or no location has a grid position.
    pub heatmap: Option<HeatmapGrid>,
    /// View zoom clamped to the configured range.
    pub zoom: f64,
    /// Most urgent first.
    pub forecasts: Vec<ForecastRecord>,
}

impl DashboardFrame {
    pub fn summaries(&self, dimension: Dimension) -> &BTreeMap<DimensionKey, DimensionSummary> {
        match dimension {
            Dimension::Category => &self.by_category,
            Dimension::Location => &self.by_location,
            Dimension::Supplier => &self.by_supplier,
        }
    }
}

/// Queued render: the data and view current when the trigger fired.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub snapshot: Arc<InventorySnapshot>,
    pub view: ViewConfig,
    pub trigger: RecomputeTrigger,
}

/// Runs every engine over a snapshot for one view.
#[derive(Debug, Clone)]
pub struct DashboardPipeline {
    config: DashboardConfig,
    heatmap: HeatmapEngine,
    forecaster: ForecastEngine,
    classifier: IntentClassifier,
}

impl Default for DashboardPipeline {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl DashboardPipeline {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            heatmap: HeatmapEngine::new(config.heatmap.clone()),
            forecaster: ForecastEngine::new(config.forecast.clone()),
            classifier: IntentClassifier::default(),
            config,
        }
    }

    pub fn with_classifier(mut self, classifier: IntentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    fn aggregator(&self, snapshot: &InventorySnapshot) -> Aggregator {
        Aggregator::new(
            self.config.aggregation.clone(),
            CapacityTable::from_locations(snapshot.locations()),
        )
    }

    fn chart_engine(&self, view: &ViewConfig) -> ChartEngine {
        let frame = if view.fullscreen {
            self.config.fullscreen_frame
        } else {
            self.config.charts.frame
        };
        ChartEngine::new(self.config.charts.clone().with_frame(frame).with_palette(view.theme))
    }

    pub fn render(&self, snapshot: &InventorySnapshot, view: &ViewConfig) -> DashboardFrame {
        let scoped = view.filter.apply(snapshot);
        let items = scoped.items();
        let aggregator = self.aggregator(&scoped);

        let overview = aggregator.overview(items);
        let by_category = aggregator.aggregate(items, Dimension::Category);
        let by_location = aggregator.aggregate(items, Dimension::Location);
        let by_supplier = aggregator.aggregate(items, Dimension::Supplier);
        let top_categories = top_n(&by_category, TOP_GROUPS, SummaryMetric::TotalValue)
            .into_iter()
            .cloned()
            .collect();

        let forecasts = self.forecaster.forecast_all(items, view.horizon_days);
        let kpis = KpiPanel {
            overview,
            scan_accuracy_rate: self.config.placeholders.scan_accuracy_rate,
            at_risk_count: forecasts.iter().filter(|f| f.risk_level >= RiskLevel::High).count(),
            predicted_shortages: forecasts.iter().filter(|f| f.predicted_shortage).count(),
        };

        let chart_source = match view.chart_dimension {
            Dimension::Category => &by_category,
            Dimension::Location => &by_location,
            Dimension::Supplier => &by_supplier,
        };
        let chart = self.chart_panel(chart_source, &aggregator, view);

        let heatmap = if view.show_grid { self.heatmap_grid(&scoped, view) } else { None };
        let zoom = self.config.heatmap.zoom.clamp(view.zoom);

        tracing::debug!(
            items = items.len(),
            chart = ?view.chart_type,
            forecasts = forecasts.len(),
            heatmap = heatmap.is_some(),
            "dashboard frame rendered"
        );

        DashboardFrame {
            view: view.clone(),
            kpis,
            by_category,
            by_location,
            by_supplier,
            top_categories,
            chart,
            heatmap,
            zoom,
            forecasts,
        }
    }

    fn chart_panel(
        &self,
        summaries: &BTreeMap<DimensionKey, DimensionSummary>,
        aggregator: &Aggregator,
        view: &ViewConfig,
    ) -> ChartPanel {
        let engine = self.chart_engine(view);
        let series = ChartSeries::from_summaries(summaries, view.chart_metric);

        // Location counts get capacity outlines; capacity is measured in items.
        let geometry = if view.chart_type == ChartType::Bar
            && view.chart_dimension == Dimension::Location
            && view.chart_metric == SummaryMetric::Count
        {
            let capacities: Vec<f64> = summaries
                .keys()
                .map(|key| {
                    let capacity = aggregator
                        .capacities()
                        .get(Dimension::Location, key)
                        .unwrap_or(self.config.aggregation.default_capacity);
                    f64::from(capacity)
                })
                .collect();
            engine.layout_bars_with_capacity(&series, Some(&capacities))
        } else {
            engine.layout(&series, view.chart_type)
        };

        let legend = if view.show_labels {
            let palette = Palette::for_id(view.theme);
            series
                .points()
                .iter()
                .map(|point| LegendEntry {
                    label: point.label.clone(),
                    value: point.value,
                    color: palette.color_at(point.color_key),
                })
                .collect()
        } else {
            Vec::new()
        };

        ChartPanel {
            chart_type: view.chart_type,
            dimension: view.chart_dimension,
            metric: view.chart_metric,
            geometry,
            legend,
        }
    }

    fn heatmap_grid(&self, snapshot: &InventorySnapshot, view: &ViewConfig) -> Option<HeatmapGrid> {
        let limit = self.config.heatmap.max_dimension;
        let (rows, cols) = snapshot
            .locations()
            .iter()
            .filter_map(|location| {
                let pos = location.grid?;
                if pos.row >= limit || pos.col >= limit {
                    tracing::warn!(
                        location = location.id.as_str(),
                        row = pos.row,
                        col = pos.col,
                        limit,
                        "location grid position beyond heatmap size limit"
                    );
                    return None;
                }
                Some(pos)
            })
            .fold(None, |acc: Option<(u32, u32)>, pos| {
                let (rows, cols) = acc.unwrap_or((0, 0));
                Some((rows.max(pos.row.saturating_add(1)), cols.max(pos.col.saturating_add(1))))
            })?;

        match GridSpec::square(rows, cols, self.config.heatmap_cell_size) {
            Ok(spec) => Some(self.heatmap.grid_from_snapshot(spec, snapshot, view.heatmap_metric)),
            Err(err) => {
                tracing::warn!(%err, rows, cols, "heatmap grid skipped");
                None
            }
        }
    }

    /// Answer a free-text question from the filtered snapshot.
    pub fn ask(&self, snapshot: &InventorySnapshot, view: &ViewConfig, question: &str) -> AssistantReply {
        let scoped = view.filter.apply(snapshot);
        let aggregator = self.aggregator(&scoped);
        let ctx = AssistantContext::build(&scoped, &aggregator, &self.forecaster, view.horizon_days);
        respond(&self.classifier, question, &ctx)
    }

    /// Reorder-risk insight over the filtered snapshot.
    pub fn reorder_insight(
        &self,
        snapshot: Arc<InventorySnapshot>,
        view: &ViewConfig,
    ) -> Result<InsightResult, InsightError> {
        let input = if view.filter.is_empty() {
            snapshot
        } else {
            Arc::new(view.filter.apply(&snapshot).into_owned())
        };
        let job = ReorderRiskJob::new(input)
            .with_horizon(view.horizon_days)
            .with_policy(self.config.forecast.clone());
        LocalInsightScheduler::new(JobScope::Only(ReorderRiskJob::KIND)).run(job)
    }

    /// Render the newest queued request.
    ///
    /// Returns `None` when nothing is queued or a newer request arrived while
    /// rendering; the stale frame is dropped.
    pub fn process_latest(
        &self,
        coalescer: &RecomputeCoalescer<RenderRequest>,
    ) -> Option<(u64, Arc<DashboardFrame>)> {
        let (generation, request) = coalescer.take_latest()?;
        tracing::debug!(generation, trigger = ?request.trigger, "recomputing dashboard");
        let frame = Arc::new(self.render(&request.snapshot, &request.view));
        if coalescer.is_current(generation) {
            Some((generation, frame))
        } else {
            tracing::debug!(generation, "discarding stale frame");
            None
        }
    }
}
