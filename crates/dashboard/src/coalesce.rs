use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Input change that invalidates the current frame.
#[derive(Debug, Clone, PartialEq)]
pub enum RecomputeTrigger {
    SnapshotChanged,
    ViewChanged,
    ZoomChanged(f64),
    HorizonChanged(u32),
}

/// Latest-wins handoff between event producers and a render worker.
///
/// Every submission gets a strictly increasing generation. Only the newest
/// pending request survives; a worker holding an older generation can ask
/// [`RecomputeCoalescer::is_current`] and drop its result.
#[derive(Debug)]
pub struct RecomputeCoalescer<T> {
    generation: AtomicU64,
    pending: Mutex<Option<(u64, T)>>,
}

impl<T> Default for RecomputeCoalescer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecomputeCoalescer<T> {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            pending: Mutex::new(None),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<(u64, T)>> {
        // The slot holds plain data; a panic elsewhere cannot leave it torn.
        match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Queue `request`, replacing anything not yet taken. Returns its generation.
    pub fn submit(&self, request: T) -> u64 {
        let mut slot = self.slot();
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        if let Some((stale, _)) = slot.replace((generation, request)) {
            tracing::debug!(stale, generation, "coalesced pending recompute");
        }
        generation
    }

    /// Newest pending request, if any.
    pub fn take_latest(&self) -> Option<(u64, T)> {
        self.slot().take()
    }

    pub fn has_pending(&self) -> bool {
        self.slot().is_some()
    }

    /// Generation of the most recent submission; 0 before the first.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Whether a result computed for `generation` is still the newest.
    pub fn is_current(&self, generation: u64) -> bool {
        generation != 0 && generation == self.latest_generation()
    }
}
