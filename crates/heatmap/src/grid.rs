use serde::{Deserialize, Serialize};

use stockpulse_core::{DomainError, DomainResult, ItemId, Rgb, ValueObject};

/// Hard limit on rows and columns of any grid.
pub const MAX_GRID_DIMENSION: u32 = 1024;

/// Grid dimensions and base (zoom = 1) cell size in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    rows: u32,
    cols: u32,
    cell_width: f64,
    cell_height: f64,
}

impl GridSpec {
    pub fn new(rows: u32, cols: u32, cell_width: f64, cell_height: f64) -> DomainResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(DomainError::validation(format!(
                "grid must have at least one row and column (got {rows}x{cols})"
            )));
        }
        if rows > MAX_GRID_DIMENSION || cols > MAX_GRID_DIMENSION {
            return Err(DomainError::validation(format!(
                "grid of {rows}x{cols} exceeds the {MAX_GRID_DIMENSION} row/column limit"
            )));
        }
        if !(cell_width.is_finite() && cell_width > 0.0 && cell_height.is_finite() && cell_height > 0.0) {
            return Err(DomainError::validation(format!(
                "cell size must be positive (got {cell_width}x{cell_height})"
            )));
        }
        Ok(Self {
            rows,
            cols,
            cell_width,
            cell_height,
        })
    }

    /// Square cells.
    pub fn square(rows: u32, cols: u32, cell_size: f64) -> DomainResult<Self> {
        Self::new(rows, cols, cell_size, cell_size)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row < self.rows && col < self.cols
    }

    /// Base bounds `(col × W, row × H, W, H)`.
    pub fn base_bounds(&self, row: u32, col: u32) -> Bounds {
        Bounds {
            x: col as f64 * self.cell_width,
            y: row as f64 * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        }
    }
}

/// Allowed zoom interval. Requests outside it are clamped.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self { min: 0.25, max: 4.0 }
    }
}

impl ZoomRange {
    /// A range is usable when `0 < min <= max` and both ends are finite.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max
    }

    /// `self` when valid, otherwise the default range.
    pub fn or_default(self) -> Self {
        if self.is_valid() { self } else { Self::default() }
    }

    /// Non-finite zoom falls back to 1.0 before clamping. An unusable range
    /// clamps as the default one.
    pub fn clamp(&self, zoom: f64) -> f64 {
        let range = self.or_default();
        let zoom = if zoom.is_finite() { zoom } else { 1.0 };
        let clamped = zoom.max(range.min).min(range.max);
        if clamped != zoom {
            tracing::debug!(requested = zoom, clamped, "zoom clamped to configured range");
        }
        clamped
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ValueObject for Bounds {}

impl Bounds {
    pub fn scaled(&self, zoom: f64) -> Self {
        Self {
            x: self.x * zoom,
            y: self.y * zoom,
            width: self.width * zoom,
            height: self.height * zoom,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Value and item references produced for one cell by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellInput {
    pub value: f64,
    pub items: Vec<ItemId>,
}

impl CellInput {
    pub fn value(value: f64) -> Self {
        Self {
            value,
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

/// One spatial unit of the heatmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    /// Bounds at zoom 1.
    pub bounds: Bounds,
    pub value: f64,
    /// In `[0, 1]`; 0 for every cell when the grid has no value spread.
    pub normalized: f64,
    pub ramp_index: usize,
    pub color: Rgb,
    /// Items located in this cell (references only).
    pub items: Vec<ItemId>,
}

impl ValueObject for GridCell {}

impl GridCell {
    pub fn cell_ref(&self) -> CellRef {
        CellRef {
            row: self.row,
            col: self.col,
        }
    }
}

/// A cell with its bounds at a given zoom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedCell<'a> {
    pub cell: &'a GridCell,
    pub bounds: Bounds,
}

/// Immutable grid built by [`HeatmapEngine`](crate::HeatmapEngine).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapGrid {
    spec: GridSpec,
    zoom_range: ZoomRange,
    min_value: f64,
    max_value: f64,
    /// Row-major.
    cells: Vec<GridCell>,
}

impl HeatmapGrid {
    pub(crate) fn new(spec: GridSpec, zoom_range: ZoomRange, cells: Vec<GridCell>) -> Self {
        let (min_value, max_value) = if cells.is_empty() {
            (0.0, 0.0)
        } else {
            cells.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
                (lo.min(c.value), hi.max(c.value))
            })
        };
        Self {
            spec,
            zoom_range,
            min_value,
            max_value,
            cells,
        }
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn value_range(&self) -> (f64, f64) {
        (self.min_value, self.max_value)
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&GridCell> {
        if !self.spec.contains(row, col) {
            return None;
        }
        self.cells.get(row as usize * self.spec.cols as usize + col as usize)
    }

    /// Every cell with bounds scaled by the (clamped) zoom factor.
    pub fn to_pixels(&self, zoom: f64) -> Vec<PositionedCell<'_>> {
        let zoom = self.zoom_range.clamp(zoom);
        self.cells
            .iter()
            .map(|cell| PositionedCell {
                cell,
                bounds: cell.bounds.scaled(zoom),
            })
            .collect()
    }

    /// Cell under the pointer at `(x, y)` in zoomed pixel space.
    pub fn hit_test(&self, x: f64, y: f64, zoom: f64) -> Option<&GridCell> {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return None;
        }
        let zoom = self.zoom_range.clamp(zoom);
        let col = (x / (self.spec.cell_width * zoom)).floor();
        let row = (y / (self.spec.cell_height * zoom)).floor();
        if col >= self.spec.cols as f64 || row >= self.spec.rows as f64 {
            return None;
        }
        self.cell(row as u32, col as u32)
    }
}
