//! Render-ready chart primitives.

use serde::{Deserialize, Serialize};

use stockpulse_core::{Rgb, ValueObject};

/// Supported chart kinds.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Pie,
    Doughnut,
    Bar,
    Line,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One wedge of a pie or doughnut chart. Angles are in degrees, clockwise,
/// with 0° at 3 o'clock (the first wedge starts at -90°).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcSegment {
    pub label: String,
    pub value: f64,
    /// Share of the total, in percent.
    pub percentage: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub color: Rgb,
    /// SVG path data; empty for zero-value segments.
    pub path: String,
}

/// Capacity outline drawn behind a bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GhostBar {
    pub capacity: f64,
    pub fraction: f64,
    pub y: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarRect {
    pub label: String,
    pub value: f64,
    /// `value / max(series)`, in `[0, 1]`.
    pub fraction: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Rgb,
    pub ghost: Option<GhostBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
    pub label: String,
    pub value: f64,
    pub point: Point,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

/// Last value compared against the series mean.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub direction: TrendDirection,
    /// `(last - mean) / mean * 100`; 0 when the mean is 0.
    pub percent_deviation: f64,
}

/// Reason a chart rendered without primitives.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyMarker {
    NoData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderGeometry {
    Empty {
        marker: EmptyMarker,
    },
    #[serde(rename_all = "camelCase")]
    Arcs {
        chart: ChartType,
        center: Point,
        outer_radius: f64,
        /// 0 for pie charts.
        inner_radius: f64,
        segments: Vec<ArcSegment>,
    },
    #[serde(rename_all = "camelCase")]
    Bars {
        baseline_y: f64,
        bars: Vec<BarRect>,
    },
    Polyline {
        points: Vec<LinePoint>,
        path: String,
        trend: Trend,
    },
}

impl ValueObject for RenderGeometry {}

impl RenderGeometry {
    pub fn no_data() -> Self {
        RenderGeometry::Empty {
            marker: EmptyMarker::NoData,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RenderGeometry::Empty { .. })
    }
}
