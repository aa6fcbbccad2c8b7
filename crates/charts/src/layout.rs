//! Chart layout entry point and its configuration.

use serde::{Deserialize, Serialize};

use stockpulse_core::{Palette, PaletteId};

use crate::arc::layout_arcs;
use crate::bar::layout_bars;
use crate::geometry::{ChartType, Point, RenderGeometry};
use crate::line::layout_line;
use crate::series::ChartSeries;

/// Drawing surface in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 300.0,
            padding: 20.0,
        }
    }
}

impl ChartFrame {
    pub fn plot_width(&self) -> f64 {
        (self.width - 2.0 * self.padding).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - 2.0 * self.padding).max(0.0)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Chart layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLayout {
    pub frame: ChartFrame,
    /// Inner radius of a doughnut as a fraction of the outer radius.
    pub doughnut_inner_ratio: f64,
    /// Horizontal distance between consecutive bars.
    pub bar_pitch: f64,
    /// Bar width as a fraction of the pitch.
    pub bar_width_ratio: f64,
    pub palette: PaletteId,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            frame: ChartFrame::default(),
            doughnut_inner_ratio: 0.6,
            bar_pitch: 48.0,
            bar_width_ratio: 0.7,
            palette: PaletteId::Default,
        }
    }
}

impl ChartLayout {
    pub fn with_frame(mut self, frame: ChartFrame) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_palette(mut self, palette: PaletteId) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_bar_pitch(mut self, bar_pitch: f64) -> Self {
        self.bar_pitch = bar_pitch;
        self
    }
}

/// Stateless chart geometry builder.
#[derive(Debug, Clone, Default)]
pub struct ChartEngine {
    layout: ChartLayout,
}

impl ChartEngine {
    pub fn new(layout: ChartLayout) -> Self {
        Self { layout }
    }

    pub fn config(&self) -> &ChartLayout {
        &self.layout
    }

    fn palette(&self) -> Palette {
        Palette::for_id(self.layout.palette)
    }

    /// Geometry for `series` drawn as `chart`.
    pub fn layout(&self, series: &ChartSeries, chart: ChartType) -> RenderGeometry {
        let geometry = match chart {
            ChartType::Pie | ChartType::Doughnut => self.layout_round(series, chart),
            ChartType::Bar => self.layout_bars_with_capacity(series, None),
            ChartType::Line => layout_line(series, &self.layout.frame),
        };
        tracing::debug!(
            ?chart,
            points = series.len(),
            empty = geometry.is_empty(),
            "chart layout computed"
        );
        geometry
    }

    /// Bar chart with optional capacity ghost bars aligned by index.
    pub fn layout_bars_with_capacity(&self, series: &ChartSeries, capacities: Option<&[f64]>) -> RenderGeometry {
        let pitch = if self.layout.bar_pitch.is_finite() && self.layout.bar_pitch > 0.0 {
            self.layout.bar_pitch
        } else {
            ChartLayout::default().bar_pitch
        };
        layout_bars(
            series,
            capacities,
            &self.layout.frame,
            pitch,
            self.layout.bar_width_ratio,
            &self.palette(),
        )
    }

    fn layout_round(&self, series: &ChartSeries, chart: ChartType) -> RenderGeometry {
        let frame = &self.layout.frame;
        let outer = frame.plot_width().min(frame.plot_height()) / 2.0;
        if outer <= 0.0 {
            return RenderGeometry::no_data();
        }
        let inner = match chart {
            ChartType::Doughnut => outer * self.layout.doughnut_inner_ratio.clamp(0.0, 0.95),
            _ => 0.0,
        };
        layout_arcs(series, chart, frame.center(), outer, inner, &self.palette())
    }
}
