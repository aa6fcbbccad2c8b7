use crate::result::{InsightError, InsightResult};

/// A unit of insight computation over an immutable input.
///
/// Inputs are supplied by callers when the job is built; this crate never
/// loads data itself.
pub trait InsightJob: Send + Sync + 'static {
    /// Stable job kind (e.g. `inventory.reorder_risk`), used for scheduling scope.
    fn kind(&self) -> &'static str;

    /// Compute the insight. Must not mutate any input.
    fn run(&self) -> Result<InsightResult, InsightError>;
}
