//! Heatmap grid engine.
//!
//! Builds a row-major grid of [`GridCell`]s from location-keyed values,
//! normalizes values onto a [`ColorRamp`](stockpulse_core::ColorRamp), and
//! provides zoom-aware pixel/cell transforms and hit-testing. Panning belongs
//! to the scroll surface that hosts the grid, not to this crate.

pub mod engine;
pub mod grid;
pub mod selection;

pub use engine::{HeatmapConfig, HeatmapEngine, HeatmapMetric};
pub use grid::{
    Bounds, CellInput, CellRef, GridCell, GridSpec, HeatmapGrid, MAX_GRID_DIMENSION, PositionedCell, ZoomRange,
};
pub use selection::CellSelection;
