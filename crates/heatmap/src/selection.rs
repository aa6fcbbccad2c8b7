use std::collections::BTreeSet;

use crate::grid::{CellRef, HeatmapGrid};

/// Selected heatmap cells. Clicking a selected cell deselects it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellSelection {
    selected: BTreeSet<CellRef>,
}

impl CellSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `cell`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, cell: CellRef) -> bool {
        if self.selected.remove(&cell) {
            false
        } else {
            self.selected.insert(cell);
            true
        }
    }

    /// Hit-test a pointer click and toggle the cell under it, if any.
    pub fn toggle_at(&mut self, grid: &HeatmapGrid, x: f64, y: f64, zoom: f64) -> Option<bool> {
        let cell = grid.hit_test(x, y, zoom)?.cell_ref();
        Some(self.toggle(cell))
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        self.selected.contains(&cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellRef> {
        self.selected.iter()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}
