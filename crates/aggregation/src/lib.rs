//! Aggregation engine.
//!
//! Groups inventory items by a dimension (category, location, supplier) into
//! [`DimensionSummary`] totals. This is the leaf of the analytics pipeline:
//! chart series and dashboard KPIs are built from its output.

pub mod capacity;
pub mod engine;
pub mod summary;

pub use capacity::CapacityTable;
pub use engine::{AggregationConfig, Aggregator};
pub use summary::{Dimension, DimensionKey, DimensionSummary, InventoryOverview, SummaryMetric, top_n};
