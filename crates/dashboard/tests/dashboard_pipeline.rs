use std::sync::Arc;
use std::thread;

use serde_json::json;

use stockpulse_aggregation::{Dimension, SummaryMetric};
use stockpulse_charts::{ChartType, RenderGeometry};
use stockpulse_core::ItemId;
use stockpulse_dashboard::{
    DashboardConfig, DashboardPipeline, ItemFilter, RecomputeCoalescer, RecomputeTrigger, RenderRequest, ViewConfig,
};
use stockpulse_devices::{ScanOutcome, SimulatedScanner, resolve_scan};
use stockpulse_forecast::{Recommendation, RiskLevel};
use stockpulse_inventory::{InventorySnapshot, SnapshotRecord, StockStatus};

fn snapshot() -> InventorySnapshot {
    let record: SnapshotRecord = serde_json::from_value(json!({
        "items": [
            {
                "id": "widget", "name": "Widget", "category": "parts", "location": "A1",
                "supplier": "acme", "quantity": 100, "minStock": 20, "maxStock": 300,
                "costPrice": 500, "sellingPrice": 800, "dailyUsageRate": 10.0,
                "leadTimeDays": 5, "lastUpdated": "2024-03-01T00:00:00Z"
            },
            {
                "id": "gasket", "name": "Gasket", "category": "parts", "location": "A2",
                "supplier": "globex", "quantity": 3, "minStock": 10, "maxStock": 50,
                "costPrice": 120, "sellingPrice": 200, "dailyUsageRate": 1.0,
                "leadTimeDays": 7, "lastUpdated": "2024-03-01T00:00:00Z"
            },
            {
                "id": "primer", "name": "Primer", "category": "paint", "location": "B1",
                "supplier": "acme", "quantity": 40, "minStock": 5, "maxStock": 80,
                "costPrice": 900, "sellingPrice": 1500, "dailyUsageRate": 0.0,
                "leadTimeDays": 3, "lastUpdated": "2024-03-01T00:00:00Z"
            },
            {
                "id": "solvent", "name": "Solvent", "category": "paint", "location": "B1",
                "supplier": "initech", "quantity": 0, "minStock": 5, "maxStock": 60,
                "costPrice": 300, "sellingPrice": 450, "dailyUsageRate": 2.0,
                "leadTimeDays": 4, "lastUpdated": "2024-03-01T00:00:00Z"
            }
        ],
        "locations": [
            { "id": "A1", "name": "Aisle 1", "capacity": 10, "grid": { "row": 0, "col": 0 } },
            { "id": "A2", "name": "Aisle 2", "capacity": 10, "grid": { "row": 0, "col": 1 } },
            { "id": "B1", "name": "Bay 1", "capacity": 0, "grid": { "row": 1, "col": 0 } },
            { "id": "DOCK", "name": "Dock", "capacity": 50 }
        ]
    }))
    .unwrap();
    InventorySnapshot::from_record(record).unwrap()
}

#[test]
fn end_to_end_frame_is_consistent() {
    let pipeline = DashboardPipeline::default();
    let frame = pipeline.render(&snapshot(), &ViewConfig::default().with_horizon(30));

    let kpis = &frame.kpis;
    assert_eq!(kpis.overview.total_items, 4);
    assert_eq!(kpis.overview.total_quantity, 143);
    assert_eq!(kpis.overview.total_value, 100 * 500 + 3 * 120 + 40 * 900);
    assert_eq!(kpis.overview.out_of_stock_count, 1);
    assert_eq!(kpis.overview.low_stock_count, 1);

    // Registered locations without items still appear.
    assert!(frame.by_location.keys().any(|k| k.as_str() == "DOCK"));
    assert_eq!(frame.by_location.values().map(|s| s.count).sum::<u64>(), 4);

    let widget = frame
        .forecasts
        .iter()
        .find(|f| f.item_id == ItemId::new("widget").unwrap())
        .unwrap();
    assert_eq!(widget.projected_stock, 0.0);
    assert!(widget.predicted_shortage);
    assert_eq!(widget.risk_level, RiskLevel::Medium);
    assert_eq!(widget.recommendation, Recommendation::Monitor);

    assert_eq!(frame.forecasts[0].risk_level, RiskLevel::Critical);
    assert_eq!(frame.forecasts.last().unwrap().item_id, ItemId::new("primer").unwrap());
}

#[test]
fn pie_angles_follow_category_values() {
    let view = ViewConfig::default().with_chart(ChartType::Pie, Dimension::Category, SummaryMetric::TotalValue);
    let frame = DashboardPipeline::default().render(&snapshot(), &view);
    let RenderGeometry::Arcs { segments, .. } = &frame.chart.geometry else {
        panic!("expected arcs, got {:?}", frame.chart.geometry);
    };
    let sweep: f64 = segments.iter().map(|s| s.sweep_angle).sum();
    assert!((sweep - 360.0).abs() < 1e-9);
    assert_eq!(segments[0].label, "paint");
    assert_eq!(segments[1].label, "parts");
}

#[test]
fn filters_scope_every_panel() {
    let view = ViewConfig::default().with_filter(ItemFilter {
        status: Some(StockStatus::OutOfStock),
        ..ItemFilter::default()
    });
    let frame = DashboardPipeline::default().render(&snapshot(), &view);
    assert_eq!(frame.kpis.overview.total_items, 1);
    assert_eq!(frame.forecasts.len(), 1);

    let heatmap = frame.heatmap.as_ref().unwrap();
    let occupied: Vec<_> = heatmap.cells().iter().filter(|c| !c.items.is_empty()).collect();
    assert_eq!(occupied.len(), 1);
    assert_eq!((occupied[0].row, occupied[0].col), (1, 0));
}

#[test]
fn heatmap_hit_test_matches_location_cells() {
    let frame = DashboardPipeline::default().render(&snapshot(), &ViewConfig::default().with_zoom(2.0));
    let heatmap = frame.heatmap.as_ref().unwrap();
    let cell = heatmap.hit_test(250.0, 50.0, frame.zoom).unwrap();
    assert_eq!((cell.row, cell.col), (0, 1));
    assert_eq!(cell.items, vec![ItemId::new("gasket").unwrap()]);
}

#[test]
fn frames_serialize_to_json() {
    let frame = DashboardPipeline::default().render(&snapshot(), &ViewConfig::default());
    let value = serde_json::to_value(&frame).unwrap();
    assert_eq!(value["kpis"]["totalItems"], 4);
    assert_eq!(value["kpis"]["scanAccuracyRate"], 0.965);
    assert_eq!(value["chart"]["geometry"]["kind"], "arcs");
}

#[test]
fn env_overrides_reach_the_frame() {
    let config = DashboardConfig::from_lookup(|key| match key {
        "STOCKPULSE_ACCURACY_RATE" => Some("0.8".to_string()),
        "STOCKPULSE_MAX_ZOOM" => Some("2".to_string()),
        _ => None,
    })
    .unwrap();
    let frame = DashboardPipeline::new(config).render(&snapshot(), &ViewConfig::default().with_zoom(3.0));
    assert_eq!(frame.kpis.scan_accuracy_rate, 0.8);
    assert_eq!(frame.zoom, 2.0);
}

#[test]
fn worker_thread_renders_only_the_latest_request() {
    let snapshot = Arc::new(snapshot());
    let coalescer = Arc::new(RecomputeCoalescer::new());

    let base = ViewConfig::default();
    for zoom in [1.0, 1.5, 2.0, 3.0] {
        coalescer.submit(RenderRequest {
            snapshot: Arc::clone(&snapshot),
            view: base.clone().with_zoom(zoom),
            trigger: RecomputeTrigger::ZoomChanged(zoom),
        });
    }

    let worker = {
        let coalescer = Arc::clone(&coalescer);
        thread::spawn(move || DashboardPipeline::default().process_latest(&coalescer))
    };
    let (generation, frame) = worker.join().unwrap().unwrap();

    assert_eq!(generation, 4);
    assert_eq!(frame.zoom, 3.0);
    assert!(coalescer.take_latest().is_none());
}

#[test]
fn stale_render_is_discarded() {
    let snapshot = Arc::new(snapshot());
    let coalescer = RecomputeCoalescer::new();
    coalescer.submit(RenderRequest {
        snapshot: Arc::clone(&snapshot),
        view: ViewConfig::default(),
        trigger: RecomputeTrigger::SnapshotChanged,
    });
    let (generation, request) = coalescer.take_latest().unwrap();
    coalescer.submit(RenderRequest {
        snapshot,
        view: ViewConfig::default().with_horizon(7),
        trigger: RecomputeTrigger::HorizonChanged(7),
    });

    let _frame = DashboardPipeline::default().render(&request.snapshot, &request.view);
    assert!(!coalescer.is_current(generation));
}

#[test]
fn simulated_scans_resolve_against_the_snapshot() {
    let snapshot = snapshot();
    let mut scanner = SimulatedScanner::new(42, 1.0).with_catalog(vec!["widget".to_string(), "ghost".to_string()]);

    let mut seen = Vec::new();
    for _ in 0..20 {
        match resolve_scan(&mut scanner, &stockpulse_devices::Frame::blank(64, 48), &snapshot) {
            ScanOutcome::Item { item_id } => seen.push(item_id.as_str().to_string()),
            ScanOutcome::Unknown { code } => assert_eq!(code, "ghost"),
            ScanOutcome::NoRead => panic!("read probability is 1"),
        }
    }
    assert!(seen.iter().all(|id| id == "widget"));
}
