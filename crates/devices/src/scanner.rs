use serde::{Deserialize, Serialize};

use stockpulse_core::{Entity, ItemId};
use stockpulse_inventory::InventorySnapshot;

/// Raw camera frame handed to a decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Grayscale, row-major.
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Symbology {
    Ean13,
    Code128,
    Qr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedCode {
    pub symbology: Symbology,
    pub value: String,
}

/// Barcode/QR decoding capability.
pub trait Scanner {
    /// Decode one frame; `None` when nothing readable is in view.
    fn decode(&mut self, frame: &Frame) -> Option<ScannedCode>;
}

/// Result of scanning a frame against the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum ScanOutcome {
    NoRead,
    Unknown { code: String },
    Item { item_id: ItemId },
}

/// Decode `frame` and look the code up as an item id.
pub fn resolve_scan<S: Scanner + ?Sized>(scanner: &mut S, frame: &Frame, snapshot: &InventorySnapshot) -> ScanOutcome {
    let Some(code) = scanner.decode(frame) else {
        return ScanOutcome::NoRead;
    };
    let found = ItemId::new(code.value.as_str())
        .ok()
        .and_then(|id| snapshot.item(&id))
        .map(|item| item.id().clone());
    match found {
        Some(item_id) => ScanOutcome::Item { item_id },
        None => {
            tracing::debug!(code = code.value.as_str(), "scanned code matches no item");
            ScanOutcome::Unknown { code: code.value }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use stockpulse_inventory::{InventoryItem, ItemRecord};

    struct FixedScanner(Option<&'static str>);

    impl Scanner for FixedScanner {
        fn decode(&mut self, _frame: &Frame) -> Option<ScannedCode> {
            self.0.map(|v| ScannedCode {
                symbology: Symbology::Code128,
                value: v.to_string(),
            })
        }
    }

    fn snapshot() -> InventorySnapshot {
        let item = InventoryItem::from_record(ItemRecord {
            id: "SKU-7".to_string(),
            name: "Bolt".to_string(),
            category: "c".to_string(),
            location: "l".to_string(),
            supplier: "s".to_string(),
            quantity: 1,
            min_stock: 0,
            max_stock: 0,
            cost_price: 0,
            selling_price: 0,
            daily_usage_rate: 0.0,
            lead_time_days: 0,
            last_updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        })
        .unwrap();
        InventorySnapshot::new(vec![item], Vec::new())
    }

    #[test]
    fn resolves_known_unknown_and_unreadable_frames() {
        let frame = Frame::blank(4, 4);
        let snap = snapshot();
        assert_eq!(
            resolve_scan(&mut FixedScanner(Some("SKU-7")), &frame, &snap),
            ScanOutcome::Item { item_id: ItemId::new("SKU-7").unwrap() }
        );
        assert_eq!(
            resolve_scan(&mut FixedScanner(Some("SKU-8")), &frame, &snap),
            ScanOutcome::Unknown { code: "SKU-8".to_string() }
        );
        assert_eq!(resolve_scan(&mut FixedScanner(None), &frame, &snap), ScanOutcome::NoRead);
    }
}
