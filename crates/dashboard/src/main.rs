use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use stockpulse_dashboard::{DashboardConfig, DashboardPipeline, ViewConfig};
use stockpulse_inventory::{InventorySnapshot, SnapshotRecord};
use stockpulse_observability::LogFormat;

/// Render one dashboard frame from a snapshot file and print it as JSON.
#[derive(Debug, Parser)]
#[command(name = "stockpulse-report", version)]
struct Cli {
    /// Inventory snapshot (JSON)
    snapshot: PathBuf,

    /// View configuration (JSON); defaults apply when omitted
    #[arg(long)]
    view: Option<PathBuf>,

    /// Log output format (`pretty` or `json`)
    #[arg(long, env = "STOCKPULSE_LOG_FORMAT")]
    log_format: Option<String>,

    /// Question for the assistant
    #[arg(trailing_var_arg = true)]
    question: Vec<String>,
}

impl Cli {
    fn question(&self) -> Option<String> {
        let question = self.question.join(" ");
        (!question.trim().is_empty()).then_some(question)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.log_format.as_deref() {
        Some(format) => stockpulse_observability::tracing::init(LogFormat::parse(format), "info"),
        None => stockpulse_observability::init(),
    }

    let config = DashboardConfig::from_env().context("loading STOCKPULSE_* configuration")?;

    let raw = fs::read_to_string(&cli.snapshot)
        .with_context(|| format!("reading snapshot {}", cli.snapshot.display()))?;
    let record: SnapshotRecord =
        serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {}", cli.snapshot.display()))?;
    let snapshot = InventorySnapshot::from_record(record).context("validating snapshot")?;

    let view = match &cli.view {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("reading view {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing view {}", path.display()))?
        }
        None => ViewConfig::default().with_horizon(config.default_horizon_days),
    };

    let pipeline = DashboardPipeline::new(config);
    let frame = pipeline.render(&snapshot, &view);
    tracing::info!(
        items = snapshot.items().len(),
        forecasts = frame.forecasts.len(),
        "report rendered"
    );

    let mut report = serde_json::json!({ "frame": frame });
    if let Some(question) = cli.question() {
        report["answer"] = serde_json::to_value(pipeline.ask(&snapshot, &view, &question))?;
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
