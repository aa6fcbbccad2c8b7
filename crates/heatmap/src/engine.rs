use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockpulse_core::{ColorRamp, Entity};
use stockpulse_inventory::InventorySnapshot;

use crate::grid::{CellInput, CellRef, GridCell, GridSpec, HeatmapGrid, MAX_GRID_DIMENSION, ZoomRange};

/// Which per-location quantity a snapshot heatmap shows.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeatmapMetric {
    #[default]
    ItemCount,
    TotalValue,
    Utilization,
}

/// Heatmap settings.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapConfig {
    pub ramp: ColorRamp,
    pub zoom: ZoomRange,
    /// Largest row/column count a snapshot grid may grow to.
    pub max_dimension: u32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            ramp: ColorRamp::thermal(),
            zoom: ZoomRange::default(),
            max_dimension: 256,
        }
    }
}

impl HeatmapConfig {
    pub fn with_ramp(mut self, ramp: ColorRamp) -> Self {
        self.ramp = ramp;
        self
    }

    /// Requires `0 < min <= max`; anything else keeps the current range.
    pub fn with_zoom_range(mut self, min: f64, max: f64) -> Self {
        let range = ZoomRange { min, max };
        if range.is_valid() {
            self.zoom = range;
        } else {
            tracing::warn!(min, max, "invalid zoom range ignored");
        }
        self
    }

    /// Clamped to `1..=MAX_GRID_DIMENSION`.
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension.clamp(1, MAX_GRID_DIMENSION);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeatmapEngine {
    config: HeatmapConfig,
}

/// `(value - min) / (max - min)`; a grid with no spread maps everything to 0.
fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let spread = max - min;
    if spread <= 0.0 || !spread.is_finite() {
        return 0.0;
    }
    ((value - min) / spread).clamp(0.0, 1.0)
}

impl HeatmapEngine {
    pub fn new(config: HeatmapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    /// Build a row-major grid, asking `value_fn` for each `(row, col)`.
    pub fn build_grid<F>(&self, spec: GridSpec, mut value_fn: F) -> HeatmapGrid
    where
        F: FnMut(u32, u32) -> CellInput,
    {
        let mut inputs = Vec::with_capacity(spec.cell_count());
        for row in 0..spec.rows() {
            for col in 0..spec.cols() {
                let mut input = value_fn(row, col);
                if !input.value.is_finite() {
                    tracing::warn!(row, col, value = input.value, "non-finite heatmap value treated as zero");
                    input.value = 0.0;
                }
                inputs.push((row, col, input));
            }
        }

        let (min, max) = inputs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, _, input)| {
                (lo.min(input.value), hi.max(input.value))
            });

        let ramp = &self.config.ramp;
        let cells: Vec<GridCell> = inputs
            .into_iter()
            .map(|(row, col, input)| {
                let normalized = normalize(input.value, min, max);
                let ramp_index = ramp.index_for(normalized);
                GridCell {
                    row,
                    col,
                    bounds: spec.base_bounds(row, col),
                    value: input.value,
                    normalized,
                    ramp_index,
                    color: ramp.stops()[ramp_index],
                    items: input.items,
                }
            })
            .collect();

        tracing::debug!(rows = spec.rows(), cols = spec.cols(), min, max, "heatmap grid built");
        HeatmapGrid::new(spec, self.config.zoom.or_default(), cells)
    }

    /// Grid over snapshot locations that carry a grid position.
    ///
    /// Cells with no location hold value 0. Locations sharing a cell are
    /// merged; positions outside the grid are skipped.
    pub fn grid_from_snapshot(&self, spec: GridSpec, snapshot: &InventorySnapshot, metric: HeatmapMetric) -> HeatmapGrid {
        #[derive(Default)]
        struct Acc {
            count: u64,
            value: u64,
            capacity: u64,
            items: Vec<stockpulse_core::ItemId>,
        }

        let mut cells: BTreeMap<CellRef, Acc> = BTreeMap::new();
        for location in snapshot.locations() {
            let Some(pos) = location.grid else {
                continue;
            };
            if !spec.contains(pos.row, pos.col) {
                tracing::warn!(
                    location = location.id.as_str(),
                    row = pos.row,
                    col = pos.col,
                    "location grid position outside heatmap bounds"
                );
                continue;
            }
            let acc = cells.entry(CellRef { row: pos.row, col: pos.col }).or_default();
            acc.capacity += u64::from(location.capacity);
            for item in snapshot.items_at(&location.id) {
                acc.count += 1;
                acc.value = acc.value.saturating_add(item.total_value());
                acc.items.push(item.id().clone());
            }
        }

        self.build_grid(spec, |row, col| match cells.remove(&CellRef { row, col }) {
            Some(acc) => {
                let value = match metric {
                    HeatmapMetric::ItemCount => acc.count as f64,
                    HeatmapMetric::TotalValue => acc.value as f64,
                    HeatmapMetric::Utilization => acc.count as f64 / acc.capacity.max(1) as f64,
                };
                CellInput { value, items: acc.items }
            }
            None => CellInput::default(),
        })
    }
}
