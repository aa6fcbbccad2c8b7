//! Pie and doughnut layout.

use core::fmt::Write;

use stockpulse_core::Palette;

use crate::geometry::{ArcSegment, ChartType, Point, RenderGeometry};
use crate::series::ChartSeries;

const START_ANGLE: f64 = -90.0;
const FULL_CIRCLE_EPSILON: f64 = 1e-9;

fn polar(center: Point, radius: f64, angle_deg: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

/// Arc command from the current pen position to `end`.
fn arc_to(path: &mut String, radius: f64, sweep: f64, clockwise: bool, end: Point) {
    let large = if sweep > 180.0 { 1 } else { 0 };
    let sweep_flag = if clockwise { 1 } else { 0 };
    let _ = write!(path, " A {radius:.3} {radius:.3} 0 {large} {sweep_flag} {:.3} {:.3}", end.x, end.y);
}

/// Closed circle as two half arcs (a single SVG arc cannot end where it starts).
fn circle(path: &mut String, center: Point, radius: f64, start: f64, clockwise: bool) {
    let a = polar(center, radius, start);
    let b = polar(center, radius, start + 180.0);
    let _ = write!(path, "M {:.3} {:.3}", a.x, a.y);
    arc_to(path, radius, 180.0, clockwise, b);
    arc_to(path, radius, 180.0, clockwise, a);
    path.push_str(" Z");
}

fn pie_path(center: Point, radius: f64, start: f64, sweep: f64) -> String {
    let mut path = String::new();
    if sweep >= 360.0 - FULL_CIRCLE_EPSILON {
        circle(&mut path, center, radius, start, true);
        return path;
    }
    let from = polar(center, radius, start);
    let to = polar(center, radius, start + sweep);
    let _ = write!(path, "M {:.3} {:.3} L {:.3} {:.3}", center.x, center.y, from.x, from.y);
    arc_to(&mut path, radius, sweep, true, to);
    path.push_str(" Z");
    path
}

/// Outer arc, line to the inner arc, inner arc reversed, close.
fn doughnut_path(center: Point, outer: f64, inner: f64, start: f64, sweep: f64) -> String {
    let mut path = String::new();
    if sweep >= 360.0 - FULL_CIRCLE_EPSILON {
        circle(&mut path, center, outer, start, true);
        path.push(' ');
        circle(&mut path, center, inner, start, false);
        return path;
    }
    let end = start + sweep;
    let outer_from = polar(center, outer, start);
    let outer_to = polar(center, outer, end);
    let inner_to = polar(center, inner, end);
    let inner_from = polar(center, inner, start);

    let _ = write!(path, "M {:.3} {:.3}", outer_from.x, outer_from.y);
    arc_to(&mut path, outer, sweep, true, outer_to);
    let _ = write!(path, " L {:.3} {:.3}", inner_to.x, inner_to.y);
    arc_to(&mut path, inner, sweep, false, inner_from);
    path.push_str(" Z");
    path
}

/// Wedges in series order; spans are proportional to each value's share.
pub(crate) fn layout_arcs(
    series: &ChartSeries,
    chart: ChartType,
    center: Point,
    outer_radius: f64,
    inner_radius: f64,
    palette: &Palette,
) -> RenderGeometry {
    // Shares are taken against the series max when the plain sum overflows.
    let mut scale = 1.0;
    let mut total = series.total();
    if !total.is_finite() {
        scale = series.max();
        total = series.points().iter().map(|p| p.value / scale).sum();
    }
    if !(total.is_finite() && total > 0.0) {
        return RenderGeometry::no_data();
    }

    let mut cursor = START_ANGLE;
    let segments = series
        .points()
        .iter()
        .map(|point| {
            let share = point.value / scale / total;
            let sweep = share * 360.0;
            let path = if sweep <= 0.0 {
                String::new()
            } else if inner_radius > 0.0 {
                doughnut_path(center, outer_radius, inner_radius, cursor, sweep)
            } else {
                pie_path(center, outer_radius, cursor, sweep)
            };
            let segment = ArcSegment {
                label: point.label.clone(),
                value: point.value,
                percentage: share * 100.0,
                start_angle: cursor,
                sweep_angle: sweep,
                color: palette.color_at(point.color_key),
                path,
            };
            cursor += sweep;
            segment
        })
        .collect();

    RenderGeometry::Arcs {
        chart,
        center,
        outer_radius,
        inner_radius,
        segments,
    }
}
