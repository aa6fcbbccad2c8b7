//! `stockpulse-core`: foundation building blocks for the analytics pipeline.
//!
//! This crate contains **pure** primitives (no IO): identifiers, the error
//! model, entity/value-object markers and the color primitives shared by chart
//! and heatmap rendering.

pub mod color;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use color::{ColorRamp, Palette, PaletteId, Rgb};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, ItemId, LocationId, SupplierId};
pub use value_object::ValueObject;
