//! `stockpulse-insights`
//!
//! **Responsibility:** derived insights computed on top of the analytics
//! engines.
//!
//! - Insights never mutate inventory state; they read an immutable snapshot.
//! - Results are plain values ([`InsightResult`]) that callers display or drop.
//! - The assistant is a closed set of keyword-derived intents mapped onto
//!   templates filled from aggregation output. There is no language model.

pub mod assistant;
pub mod job;
pub mod reorder_risk;
pub mod result;
pub mod scheduler;

pub use assistant::{AssistantContext, AssistantReply, Intent, IntentClassifier, IntentRule, respond};
pub use job::InsightJob;
pub use reorder_risk::{AtRiskItem, ReorderRiskJob};
pub use result::{InsightError, InsightResult};
pub use scheduler::{InsightScheduler, JobScope, LocalInsightScheduler};
