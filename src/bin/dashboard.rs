//! Dashboard Binary - render the aggregates as a text report
//!
//! Loads the persisted enriched table plus the externally computed analysis
//! results, applies category/region filters, and prints the KPIs, grouped
//! aggregates, forecast overlay, and regional stats. All aggregation happens
//! in the library; this binary only renders.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin dashboard -- --category Electronics --region North
//! ```
//!
//! `--category` and `--region` may be repeated; omitting an axis leaves it
//! unfiltered.
//!
//! ## Environment Variables
//!
//! - SALES_DATA_DIR - Directory holding the ETL artifacts (default: data)
//! - RUST_LOG - Logging level (optional, default: info)

use std::env;

use salesflow::{AnalysisResults, DashboardFilter, EtlConfig, TableCache};

/// Collect every value following occurrences of `flag`.
fn parse_multi_flag(args: &[String], flag: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == flag {
            if let Some(value) = iter.next() {
                values.push(value.clone());
            }
        }
    }
    values
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let config = EtlConfig::from_env()?;
    let args: Vec<String> = env::args().collect();

    let mut filter = DashboardFilter::new();
    let categories = parse_multi_flag(&args, "--category");
    if !categories.is_empty() {
        filter = filter.categories(categories);
    }
    let regions = parse_multi_flag(&args, "--region");
    if !regions.is_empty() {
        filter = filter.regions(regions);
    }

    log::info!("📖 Loading {}", config.csv_path.display());
    let mut cache = TableCache::new();
    let records = cache.load(&config.csv_path)?;

    log::info!("📖 Loading {}", config.results_path.display());
    let results = AnalysisResults::from_path(&config.results_path)?;

    let dashboard = salesflow::dashboard::build(records, &filter, &results)?;

    println!("=== Sales KPIs ===");
    println!("Total sales:       {:.0}", dashboard.kpis.total_sales);
    println!("Average sale:      {:.2}", dashboard.kpis.average_sale);
    println!("Total customers:   {}", dashboard.kpis.total_customers);
    println!("Sales/customers r: {:.3}", dashboard.kpis.correlation);

    println!("\n=== Sales by category ===");
    for (category, sales) in &dashboard.sales_by_category {
        let share = sales / dashboard.kpis.total_sales * 100.0;
        println!("{:<16} {:>12.0}  ({:.1}%)", category, sales, share);
    }

    println!(
        "\n=== Daily sales ({} days, {} to {}) ===",
        dashboard.daily_sales.len(),
        dashboard.daily_sales.first().map(|(d, _)| d.to_string()).unwrap_or_default(),
        dashboard.daily_sales.last().map(|(d, _)| d.to_string()).unwrap_or_default(),
    );

    println!(
        "\n=== Forecast ({} days from {}) ===",
        dashboard.forecast.dates.len(),
        dashboard
            .forecast
            .dates
            .first()
            .map(|d| d.to_string())
            .unwrap_or_default(),
    );
    for i in 0..dashboard.forecast.dates.len() {
        println!(
            "{}  mean {:>9.1}  [{:>9.1}, {:>9.1}]",
            dashboard.forecast.dates[i],
            dashboard.forecast.mean[i],
            dashboard.forecast.lower[i],
            dashboard.forecast.upper[i],
        );
    }

    println!("\n=== Regional stats ===");
    for stat in &dashboard.regional {
        println!(
            "{:<8} total {:>12.0}  share {:.1}%",
            stat.region,
            stat.total_sales,
            stat.market_share * 100.0
        );
    }

    Ok(())
}
