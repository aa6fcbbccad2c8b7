//! Dashboard facade over the analytics engines.
//!
//! [`DashboardPipeline`] turns an [`InventorySnapshot`](stockpulse_inventory::InventorySnapshot)
//! and an immutable [`ViewConfig`] into a [`DashboardFrame`]. Rapid input
//! changes go through [`RecomputeCoalescer`] so only the newest request is rendered.

pub mod coalesce;
pub mod config;
pub mod pipeline;
pub mod view;

pub use coalesce::{RecomputeCoalescer, RecomputeTrigger};
pub use config::{ConfigError, DashboardConfig, PlaceholderMetrics};
pub use pipeline::{ChartPanel, DashboardFrame, DashboardPipeline, KpiPanel, LegendEntry, RenderRequest};
pub use view::{ItemFilter, ViewConfig};
