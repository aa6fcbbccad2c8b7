//! Templated inventory assistant.
//!
//! Free text is reduced to one [`Intent`] by checking keyword rules in an
//! explicit priority order: when a question matches several rules, the rule
//! listed first wins. Each intent renders a fixed template filled from
//! aggregation and forecast output.

use std::collections::BTreeMap;

use serde::Serialize;

use stockpulse_aggregation::{
    Aggregator, Dimension, DimensionKey, DimensionSummary, InventoryOverview, SummaryMetric, top_n,
};
use stockpulse_forecast::{ForecastEngine, ForecastRecord, RiskLevel};
use stockpulse_inventory::InventorySnapshot;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    OutOfStock,
    LowStock,
    Reorder,
    TotalValue,
    Category,
    Location,
    Supplier,
    Help,
}

/// Keywords that select an intent. Matching is case-insensitive substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: Vec<&'static str>,
}

impl IntentRule {
    pub fn new(intent: Intent, keywords: &[&'static str]) -> Self {
        Self {
            intent,
            keywords: keywords.to_vec(),
        }
    }

    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k))
    }
}

/// Ordered rule list; the first matching rule decides the intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(vec![
            IntentRule::new(Intent::OutOfStock, &["out of stock", "out-of-stock", "stockout", "sold out"]),
            IntentRule::new(Intent::LowStock, &["low stock", "low-stock", "running low", "shortage"]),
            IntentRule::new(Intent::Reorder, &["reorder", "restock", "forecast", "predict"]),
            IntentRule::new(Intent::TotalValue, &["value", "worth", "total"]),
            IntentRule::new(Intent::Category, &["category", "categories"]),
            IntentRule::new(Intent::Location, &["location", "warehouse", "where"]),
            IntentRule::new(Intent::Supplier, &["supplier", "vendor"]),
        ])
    }
}

impl IntentClassifier {
    pub fn new(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// First matching rule in priority order; [`Intent::Help`] when none match.
    pub fn classify(&self, text: &str) -> Intent {
        let text = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&text))
            .map(|rule| rule.intent)
            .unwrap_or(Intent::Help)
    }
}

/// Data the templates draw from.
#[derive(Debug, Clone)]
pub struct AssistantContext {
    pub overview: InventoryOverview,
    pub by_category: BTreeMap<DimensionKey, DimensionSummary>,
    pub by_location: BTreeMap<DimensionKey, DimensionSummary>,
    pub by_supplier: BTreeMap<DimensionKey, DimensionSummary>,
    /// Most urgent first.
    pub forecasts: Vec<ForecastRecord>,
}

impl AssistantContext {
    pub fn build(
        snapshot: &InventorySnapshot,
        aggregator: &Aggregator,
        forecaster: &ForecastEngine,
        horizon_days: u32,
    ) -> Self {
        let items = snapshot.items();
        Self {
            overview: aggregator.overview(items),
            by_category: aggregator.aggregate(items, Dimension::Category),
            by_location: aggregator.aggregate(items, Dimension::Location),
            by_supplier: aggregator.aggregate(items, Dimension::Supplier),
            forecasts: forecaster.forecast_all(items, horizon_days),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantReply {
    pub intent: Intent,
    pub text: String,
}

fn money(cents: u64) -> String {
    let dollars = cents / 100;
    let digits = dollars.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}.{:02}", cents % 100)
}

fn ranked_list(
    summaries: &BTreeMap<DimensionKey, DimensionSummary>,
    metric: SummaryMetric,
    render: impl Fn(&DimensionSummary) -> String,
) -> String {
    top_n(summaries, 3, metric)
        .into_iter()
        .map(|s| format!("{} ({})", s.key, render(s)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render(intent: Intent, ctx: &AssistantContext) -> String {
    let overview = &ctx.overview;
    match intent {
        Intent::OutOfStock => {
            if overview.out_of_stock_count == 0 {
                return "No items are out of stock.".to_string();
            }
            format!(
                "{} item(s) are out of stock. Most affected categories: {}.",
                overview.out_of_stock_count,
                ranked_list(&ctx.by_category, SummaryMetric::OutOfStock, |s| s.out_of_stock_count.to_string())
            )
        }
        Intent::LowStock => {
            if overview.low_stock_count == 0 {
                return "No items are running low.".to_string();
            }
            format!(
                "{} item(s) are at or below their minimum stock. Most affected categories: {}.",
                overview.low_stock_count,
                ranked_list(&ctx.by_category, SummaryMetric::LowStock, |s| s.low_stock_count.to_string())
            )
        }
        Intent::Reorder => {
            let urgent: Vec<String> = ctx
                .forecasts
                .iter()
                .filter(|r| r.risk_level >= RiskLevel::High)
                .take(3)
                .map(|r| format!("{} ({})", r.item_id, r.recommendation))
                .collect();
            if urgent.is_empty() {
                "No items need reordering soon.".to_string()
            } else {
                format!("Reorder priorities: {}.", urgent.join(", "))
            }
        }
        Intent::TotalValue => format!(
            "Total inventory value is {} across {} item(s) ({} units).",
            money(overview.total_value),
            overview.total_items,
            overview.total_quantity
        ),
        Intent::Category => format!(
            "Top categories by value: {}.",
            ranked_list(&ctx.by_category, SummaryMetric::TotalValue, |s| money(s.total_value))
        ),
        Intent::Location => format!(
            "Busiest locations: {}.",
            ranked_list(&ctx.by_location, SummaryMetric::Utilization, |s| {
                format!("{:.0}% utilized", s.utilization * 100.0)
            })
        ),
        Intent::Supplier => format!(
            "Top suppliers by item count: {}.",
            ranked_list(&ctx.by_supplier, SummaryMetric::Count, |s| format!("{} items", s.count))
        ),
        Intent::Help => "I can answer questions about stock levels, reorders, inventory value, \
                         categories, locations and suppliers."
            .to_string(),
    }
}

/// Classify `question` and render the matching template.
pub fn respond(classifier: &IntentClassifier, question: &str, ctx: &AssistantContext) -> AssistantReply {
    let intent = classifier.classify(question);
    tracing::debug!(?intent, "assistant intent resolved");
    AssistantReply {
        intent,
        text: render(intent, ctx),
    }
}
