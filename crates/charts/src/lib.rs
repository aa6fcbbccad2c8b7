//! Chart geometry engine.
//!
//! Turns a labeled [`ChartSeries`] into render-ready [`RenderGeometry`]:
//! SVG arc paths for pie/doughnut charts, rectangles for bar charts and a
//! polyline plus trend metric for line charts. No drawing happens here;
//! consumers take the geometry and paint it.

mod arc;
mod bar;
mod line;

pub mod geometry;
pub mod layout;
pub mod series;

pub use geometry::{
    ArcSegment, BarRect, ChartType, EmptyMarker, GhostBar, LinePoint, Point, RenderGeometry, Trend,
    TrendDirection,
};
pub use layout::{ChartEngine, ChartFrame, ChartLayout};
pub use series::{ChartSeries, SeriesPoint};
