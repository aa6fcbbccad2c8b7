//! Stock forecasting.
//!
//! A linear depletion model: stock falls by the item's daily usage rate every
//! day. From that projection the engine derives days until the reorder point,
//! a risk classification and a recommended action. Everything is a pure
//! function of the item state and horizon; there is no randomness.

pub mod engine;
pub mod policy;
pub mod record;

pub use engine::ForecastEngine;
pub use policy::{ConfidenceTier, ForecastPolicy, RiskThresholds};
pub use record::{DaysUntilReorder, ForecastRecord, ProjectionBand, Recommendation, RiskLevel};
