use core::fmt::Write;

use crate::geometry::{LinePoint, Point, RenderGeometry, Trend, TrendDirection};
use crate::layout::ChartFrame;
use crate::series::ChartSeries;

pub(crate) fn trend(series: &ChartSeries) -> Trend {
    let mean = series.mean();
    let last = series.points().last().map(|p| p.value).unwrap_or(0.0);
    let direction = if last >= mean { TrendDirection::Up } else { TrendDirection::Down };
    let percent_deviation = if mean > 0.0 { (last - mean) / mean * 100.0 } else { 0.0 };
    Trend {
        direction,
        percent_deviation,
    }
}

/// Index maps linearly to x; larger values sit higher (smaller y).
pub(crate) fn layout_line(series: &ChartSeries, frame: &ChartFrame) -> RenderGeometry {
    let max = series.max();
    if max <= 0.0 {
        return RenderGeometry::no_data();
    }

    let plot_width = frame.plot_width();
    let plot_height = frame.plot_height();
    let n = series.len();
    let step = if n > 1 { plot_width / (n - 1) as f64 } else { 0.0 };

    let points: Vec<LinePoint> = series
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = if n > 1 {
                frame.padding + i as f64 * step
            } else {
                frame.padding + plot_width / 2.0
            };
            let y = frame.padding + plot_height * (1.0 - p.value / max);
            LinePoint {
                label: p.label.clone(),
                value: p.value,
                point: Point::new(x, y),
            }
        })
        .collect();

    let mut path = String::new();
    for (i, lp) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        let _ = write!(path, "{cmd} {:.3} {:.3}", lp.point.x, lp.point.y);
    }

    RenderGeometry::Polyline {
        points,
        path,
        trend: trend(series),
    }
}
