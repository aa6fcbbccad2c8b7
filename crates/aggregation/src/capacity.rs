use std::collections::BTreeMap;

use stockpulse_inventory::LocationMeta;

use crate::summary::{Dimension, DimensionKey};

/// Externally supplied capacities per (dimension, key).
///
/// Every key registered here shows up in aggregation output, even when no item
/// references it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapacityTable {
    entries: BTreeMap<(Dimension, DimensionKey), u32>,
}

impl CapacityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location capacities taken from snapshot metadata.
    pub fn from_locations(locations: &[LocationMeta]) -> Self {
        let mut table = Self::new();
        for location in locations {
            table = table.with_capacity(Dimension::Location, location.id.as_str(), location.capacity);
        }
        table
    }

    pub fn with_capacity(mut self, dimension: Dimension, key: impl Into<String>, capacity: u32) -> Self {
        self.entries.insert((dimension, DimensionKey::new(key)), capacity);
        self
    }

    pub fn get(&self, dimension: Dimension, key: &DimensionKey) -> Option<u32> {
        self.entries.get(&(dimension, key.clone())).copied()
    }

    /// Keys registered for `dimension`, in ascending order.
    pub fn keys(&self, dimension: Dimension) -> impl Iterator<Item = &DimensionKey> {
        self.entries
            .keys()
            .filter(move |(d, _)| *d == dimension)
            .map(|(_, key)| key)
    }
}
