//! End-to-end pipeline tests: raw table → transform → persist → dashboard

use chrono::{Duration, NaiveDate};
use salesflow::persist::csv::{read_enriched_csv, write_enriched_csv};
use salesflow::persist::SalesDb;
use salesflow::table::{RawTable, SalesTier, REQUIRED_COLUMNS};
use salesflow::{AnalysisResults, DashboardFilter, TransformPipeline};
use tempfile::tempdir;

/// One year of daily rows for a single product with constant sales.
fn constant_year_table(sales: f64) -> RawTable {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let mut table = RawTable::new(REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect());
    for i in 0..365 {
        let date = start + Duration::days(i);
        table.rows.push(vec![
            date.format("%Y-%m-%d").to_string(),
            "A".to_string(),
            "Electronics".to_string(),
            format!("{}", sales),
            "50".to_string(),
            "North".to_string(),
        ]);
    }
    table
}

fn results_bundle() -> AnalysisResults {
    let mean: Vec<String> = (0..30).map(|i| format!("{}", 1000 + i)).collect();
    let upper: Vec<String> = (0..30).map(|i| format!("{}", 1100 + i)).collect();
    let lower: Vec<String> = (0..30).map(|i| format!("{}", 900 + i)).collect();
    let json = format!(
        r#"{{
            "descriptive": {{"correlation": 0.55}},
            "time_series": {{
                "forecast_mean": [{}],
                "forecast_upper": [{}],
                "forecast_lower": [{}]
            }},
            "regional": {{
                "regional_stats": [
                    {{"region": "North", "total_sales": 219000.0, "market_share": 0.6}},
                    {{"region": "South", "total_sales": 146000.0, "market_share": 0.4}}
                ]
            }}
        }}"#,
        mean.join(","),
        upper.join(","),
        lower.join(",")
    );
    AnalysisResults::from_json(&json).unwrap()
}

#[test]
fn test_constant_year_scenario() {
    let raw = constant_year_table(1000.0);
    let mut pipeline = TransformPipeline::new();
    let outcome = pipeline.run(&raw).unwrap();

    assert_eq!(outcome.records.len(), 365);
    assert!(outcome.degraded.is_empty());
    assert!(outcome
        .records
        .iter()
        .all(|r| r.sales_category == SalesTier::Medium));
    assert!(outcome
        .records
        .iter()
        .all(|r| r.sales_trailing_avg == 1000.0));

    let dashboard = salesflow::dashboard::build(
        &outcome.records,
        &DashboardFilter::new(),
        &results_bundle(),
    )
    .unwrap();
    assert_eq!(dashboard.kpis.total_sales, 365_000.0);
    assert_eq!(dashboard.kpis.total_customers, 365 * 50);
}

#[test]
fn test_forecast_overlay_alignment() {
    let raw = constant_year_table(1000.0);
    let outcome = TransformPipeline::new().run(&raw).unwrap();

    let dashboard = salesflow::dashboard::build(
        &outcome.records,
        &DashboardFilter::new(),
        &results_bundle(),
    )
    .unwrap();

    // The table ends on 2023-12-31; the forecast starts one day later and
    // spans exactly the bundle's 30 points.
    assert_eq!(dashboard.forecast.dates.len(), 30);
    assert_eq!(
        dashboard.forecast.dates[0],
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    );
    assert_eq!(
        dashboard.forecast.dates[29],
        NaiveDate::from_ymd_opt(2024, 1, 30).unwrap()
    );
}

#[test]
fn test_region_filter_keeps_external_share() {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let mut raw = RawTable::new(REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect());
    for (i, region) in ["North", "South", "North", "South"].iter().enumerate() {
        let date = start + Duration::days(i as i64);
        raw.rows.push(vec![
            date.format("%Y-%m-%d").to_string(),
            "A".to_string(),
            "Electronics".to_string(),
            "1000".to_string(),
            "50".to_string(),
            region.to_string(),
        ]);
    }

    let outcome = TransformPipeline::new().run(&raw).unwrap();
    let filter = DashboardFilter::new().regions(vec!["South".to_string()]);
    let dashboard =
        salesflow::dashboard::build(&outcome.records, &filter, &results_bundle()).unwrap();

    assert_eq!(dashboard.records.len(), 2);
    let south = dashboard
        .regional
        .iter()
        .find(|s| s.region == "South")
        .unwrap();
    // Filtering the table never recomputes externally supplied shares.
    assert_eq!(south.market_share, 0.4);
}

#[test]
fn test_persist_round_trip() {
    let raw = constant_year_table(1234.5);
    let outcome = TransformPipeline::new().run(&raw).unwrap();

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("data").join("processed_sales.csv");
    write_enriched_csv(&csv_path, &outcome.records).unwrap();

    let reloaded = read_enriched_csv(&csv_path).unwrap();
    assert_eq!(reloaded.len(), outcome.records.len());
    assert_eq!(reloaded, outcome.records);

    let mut db = SalesDb::open(dir.path().join("data").join("sales_database.db")).unwrap();
    db.replace_all(&outcome.records).unwrap();
    assert_eq!(db.count_rows().unwrap(), 365);
}

#[test]
fn test_empty_filter_fails_cleanly() {
    let raw = constant_year_table(1000.0);
    let outcome = TransformPipeline::new().run(&raw).unwrap();

    let filter = DashboardFilter::new().categories(vec!["Furniture".to_string()]);
    let err =
        salesflow::dashboard::build(&outcome.records, &filter, &results_bundle()).unwrap_err();
    assert!(err.to_string().contains("Furniture"));

    // The enriched table is untouched by the failed aggregation.
    assert_eq!(outcome.records.len(), 365);
}
