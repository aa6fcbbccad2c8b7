use serde::{Deserialize, Serialize};

use stockpulse_core::{DomainResult, LocationId};

/// Position of a location on the warehouse heatmap grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: u32,
    pub col: u32,
}

/// Raw location metadata as delivered by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Number of item slots the location can hold.
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub grid: Option<GridPosition>,
}

/// Validated location metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationMeta {
    pub id: LocationId,
    pub name: String,
    /// Raw capacity; may be zero. Use [`LocationMeta::effective_capacity`] for division.
    pub capacity: u32,
    pub grid: Option<GridPosition>,
}

impl LocationMeta {
    pub fn from_record(record: LocationRecord) -> DomainResult<Self> {
        Ok(Self {
            id: LocationId::new(record.id)?,
            name: record.name,
            capacity: record.capacity,
            grid: record.grid,
        })
    }

    /// Capacity guarded to be at least 1.
    pub fn effective_capacity(&self) -> u32 {
        self.capacity.max(1)
    }
}
