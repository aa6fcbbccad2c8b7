//! Inventory system-of-record model.
//!
//! Items are owned by an external store; this crate validates raw records into
//! typed, read-only snapshots. All analytics are derived from an
//! [`InventorySnapshot`] and never mutate it.

pub mod item;
pub mod location;
pub mod snapshot;

pub use item::{InventoryItem, ItemRecord, StockStatus};
pub use location::{GridPosition, LocationMeta, LocationRecord};
pub use snapshot::{InventorySnapshot, SnapshotRecord};
