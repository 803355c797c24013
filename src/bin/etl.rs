//! ETL Binary - generate, transform, persist
//!
//! Runs the full pipeline once: synthesize a raw sales table, enrich it, and
//! persist the result as CSV plus a SQLite `sales` table with a metadata
//! sidecar.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin etl
//! ```
//!
//! ## Environment Variables
//!
//! - SALES_DATA_DIR - Output directory for all artifacts (default: data)
//! - SALES_SEED - Generator seed (default: 42)
//! - SALES_START_DATE / SALES_END_DATE - Daily date range, end inclusive
//!   (defaults: 2023-01-01 / 2024-01-01)
//! - RUST_LOG - Logging level (optional, default: info)

use salesflow::persist::{csv, RunMetadata, SalesDb};
use salesflow::{EtlConfig, GeneratorConfig, TransformPipeline};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let config = EtlConfig::from_env()?;

    log::info!("🚀 Starting sales ETL pipeline");
    log::info!("   Data dir: {}", config.data_dir.display());
    log::info!("   Seed: {}", config.seed);
    log::info!(
        "   Date range: {} to {}",
        config.start_date,
        config.end_date
    );

    let raw = salesflow::generator::generate(&GeneratorConfig {
        start_date: config.start_date,
        end_date: config.end_date,
        seed: config.seed,
    })?;
    log::info!("✅ Extracted {} raw records", raw.len());

    let mut pipeline = TransformPipeline::new();
    let outcome = pipeline.run(&raw)?;
    for degraded in &outcome.degraded {
        log::warn!("   Degraded partition: {}", degraded);
    }

    csv::write_enriched_csv(&config.csv_path, &outcome.records)?;
    log::info!("✅ CSV saved: {}", config.csv_path.display());

    let mut db = SalesDb::open(&config.db_path)?;
    db.replace_all(&outcome.records)?;
    log::info!("✅ SQLite database saved: {}", config.db_path.display());

    let metadata = RunMetadata::for_records(&outcome.records);
    metadata.write(&config.metadata_path)?;

    log::info!("📊 Total records: {}", metadata.total_records);
    log::info!("📅 Period: {}", metadata.date_range);
    log::info!("🎉 ETL pipeline finished");

    Ok(())
}
