//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Only system-of-record types implement this; derived outputs (summaries,
/// geometry, cells, forecasts) have no identity of their own.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
