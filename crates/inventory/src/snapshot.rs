//! Immutable input snapshot consumed by every engine.

use serde::Deserialize;

use stockpulse_core::{DomainResult, Entity, ItemId, LocationId};

use crate::item::{InventoryItem, ItemRecord};
use crate::location::{LocationMeta, LocationRecord};

/// Raw snapshot document (items + location metadata).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotRecord {
    #[serde(default)]
    pub items: Vec<ItemRecord>,
    #[serde(default)]
    pub locations: Vec<LocationRecord>,
}

/// Read-only view of the inventory at one point in time.
///
/// Items are kept sorted by id so every downstream computation iterates in a
/// deterministic order regardless of how the store delivered them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventorySnapshot {
    items: Vec<InventoryItem>,
    locations: Vec<LocationMeta>,
}

impl InventorySnapshot {
    pub fn new(mut items: Vec<InventoryItem>, mut locations: Vec<LocationMeta>) -> Self {
        items.sort_by(|a, b| a.id().cmp(b.id()));
        locations.sort_by(|a, b| a.id.cmp(&b.id));
        Self { items, locations }
    }

    /// Validate every record; the first invalid record aborts the load.
    pub fn from_record(record: SnapshotRecord) -> DomainResult<Self> {
        let items = record
            .items
            .into_iter()
            .map(InventoryItem::from_record)
            .collect::<DomainResult<Vec<_>>>()?;
        let locations = record
            .locations
            .into_iter()
            .map(LocationMeta::from_record)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self::new(items, locations))
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn locations(&self) -> &[LocationMeta] {
        &self.locations
    }

    pub fn item(&self, id: &ItemId) -> Option<&InventoryItem> {
        self.items
            .binary_search_by(|item| item.id().cmp(id))
            .ok()
            .map(|idx| &self.items[idx])
    }

    pub fn location(&self, id: &LocationId) -> Option<&LocationMeta> {
        self.locations.iter().find(|l| &l.id == id)
    }

    pub fn items_at<'a>(&'a self, location: &'a LocationId) -> impl Iterator<Item = &'a InventoryItem> + 'a {
        self.items.iter().filter(move |item| item.location() == location)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
