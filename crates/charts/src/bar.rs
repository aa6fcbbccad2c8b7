use stockpulse_core::Palette;

use crate::geometry::{BarRect, GhostBar, RenderGeometry};
use crate::layout::ChartFrame;
use crate::series::ChartSeries;

/// Bars scaled by the maximum of this series; `capacities` (aligned by index)
/// become ghost bars over the same denominator.
pub(crate) fn layout_bars(
    series: &ChartSeries,
    capacities: Option<&[f64]>,
    frame: &ChartFrame,
    pitch: f64,
    width_ratio: f64,
    palette: &Palette,
) -> RenderGeometry {
    let max = series.max();
    if max <= 0.0 {
        return RenderGeometry::no_data();
    }

    let plot_height = frame.plot_height();
    let baseline_y = frame.padding + plot_height;
    let width = pitch * width_ratio.clamp(0.0, 1.0);

    let bars = series
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let fraction = point.value / max;
            let height = fraction * plot_height;
            let ghost = capacities
                .and_then(|caps| caps.get(i).copied())
                .filter(|cap| cap.is_finite() && *cap > 0.0)
                .map(|capacity| {
                    let fraction = (capacity / max).clamp(0.0, 1.0);
                    let height = fraction * plot_height;
                    GhostBar {
                        capacity,
                        fraction,
                        y: baseline_y - height,
                        height,
                    }
                });
            BarRect {
                label: point.label.clone(),
                value: point.value,
                fraction,
                x: frame.padding + i as f64 * pitch + (pitch - width) / 2.0,
                y: baseline_y - height,
                width,
                height,
                color: palette.color_at(point.color_key),
                ghost,
            }
        })
        .collect();

    RenderGeometry::Bars { baseline_y, bars }
}
