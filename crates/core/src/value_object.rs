//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Every derived structure the pipeline produces (summaries, chart geometry,
/// grid cells, forecast records) is a value object: it is rebuilt from the
/// input snapshot rather than mutated, and two instances built from the same
/// input compare equal.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Bounds { x: f64, y: f64, width: f64, height: f64 }
///
/// impl ValueObject for Bounds {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
