use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Outcome of an insight job; display data only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightResult {
    /// Kind of the job that produced this result.
    pub kind: String,
    /// Job-specific magnitude. For reorder risk: number of flagged items.
    pub score: f64,
    /// In `[0, 1]`; NaN is stored as 0.
    pub confidence: f64,
    pub summary: String,
    /// Per-subject rows.
    pub details: JsonValue,
}

impl InsightResult {
    pub fn new(kind: impl Into<String>, score: f64, confidence: f64) -> Self {
        Self {
            kind: kind.into(),
            score,
            confidence: if confidence.is_nan() { 0.0 } else { confidence.clamp(0.0, 1.0) },
            summary: String::new(),
            details: JsonValue::Null,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_details(mut self, details: JsonValue) -> Self {
        self.details = details;
        self
    }
}

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("invalid insight input: {0}")]
    InvalidInput(String),

    #[error("insight job {kind} is outside the scheduler scope")]
    OutOfScope { kind: String },

    #[error("failed to encode insight details: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_bounded() {
        assert_eq!(InsightResult::new("k", 1.0, 1.7).confidence, 1.0);
        assert_eq!(InsightResult::new("k", 1.0, -0.2).confidence, 0.0);
        assert_eq!(InsightResult::new("k", 1.0, f64::NAN).confidence, 0.0);
    }
}
