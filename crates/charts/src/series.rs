use std::collections::BTreeMap;

use serde::Serialize;

use stockpulse_aggregation::{DimensionKey, DimensionSummary, SummaryMetric};
use stockpulse_core::ValueObject;

/// One labeled value of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub label: String,
    /// Always finite and non-negative.
    pub value: f64,
    /// Position in the series; drives round-robin palette assignment.
    pub color_key: usize,
}

/// Ordered, labeled values. Purely derived; rebuilt on every input change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    points: Vec<SeriesPoint>,
}

impl ValueObject for ChartSeries {}

fn sanitize(label: &str, value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!(label, value, "chart value clamped to zero");
        0.0
    }
}

impl ChartSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point. Negative and non-finite values are clamped to zero.
    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        let label = label.into();
        let value = sanitize(&label, value);
        let color_key = self.points.len();
        self.points.push(SeriesPoint { label, value, color_key });
    }

    pub fn from_pairs<L: Into<String>>(pairs: impl IntoIterator<Item = (L, f64)>) -> Self {
        let mut series = Self::new();
        for (label, value) in pairs {
            series.push(label, value);
        }
        series
    }

    /// Series over aggregation output, in key order.
    pub fn from_summaries(summaries: &BTreeMap<DimensionKey, DimensionSummary>, metric: SummaryMetric) -> Self {
        Self::from_pairs(
            summaries
                .values()
                .map(|summary| (summary.key.to_string(), summary.metric(metric))),
        )
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Largest value; 0 for an empty series.
    pub fn max(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }

    /// Stays finite when the plain sum overflows.
    pub fn mean(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        let n = self.points.len() as f64;
        let total = self.total();
        if total.is_finite() {
            total / n
        } else {
            self.points.iter().map(|p| p.value / n).sum()
        }
    }
}
