//! Synthetic sales data generation
//!
//! Produces the raw table the transform stage consumes. Output is a
//! [`RawTable`] of string cells so generated data flows through the same
//! schema validation as any externally ingested table. Deterministic for a
//! fixed seed.

use chrono::NaiveDate;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::{Normal, Poisson};

use crate::table::{RawTable, REQUIRED_COLUMNS};

pub const PRODUCT_IDS: [&str; 4] = ["A", "B", "C", "D"];
pub const CATEGORIES: [&str; 3] = ["Electronics", "Clothing", "Home"];
pub const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

const SALES_MEAN: f64 = 1000.0;
const SALES_STD_DEV: f64 = 200.0;
const CUSTOMERS_MEAN: f64 = 50.0;
/// Amplitude of the yearly sinusoidal seasonality applied to sales.
const SEASONALITY_AMPLITUDE: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub start_date: NaiveDate,
    /// Inclusive end of the daily date range.
    pub end_date: NaiveDate,
    pub seed: u64,
}

#[derive(Debug)]
pub struct GeneratorError {
    message: String,
}

impl std::fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "generator: {}", self.message)
    }
}

impl std::error::Error for GeneratorError {}

/// Generate one observation per day across the configured range.
pub fn generate(config: &GeneratorConfig) -> Result<RawTable, GeneratorError> {
    if config.end_date < config.start_date {
        return Err(GeneratorError {
            message: format!(
                "end date {} precedes start date {}",
                config.end_date, config.start_date
            ),
        });
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let sales_dist = Normal::new(SALES_MEAN, SALES_STD_DEV).map_err(|e| GeneratorError {
        message: format!("sales distribution: {e}"),
    })?;
    let customers_dist = Poisson::new(CUSTOMERS_MEAN).map_err(|e| GeneratorError {
        message: format!("customers distribution: {e}"),
    })?;

    let n_days = (config.end_date - config.start_date).num_days() + 1;
    log::info!("📅 Generating {} daily records...", n_days);

    let mut table = RawTable::new(REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect());
    for i in 0..n_days {
        let date = config.start_date + chrono::Duration::days(i);
        let product_id = PRODUCT_IDS.choose(&mut rng).unwrap_or(&"A");
        let category = CATEGORIES.choose(&mut rng).unwrap_or(&"Electronics");
        let region = REGIONS.choose(&mut rng).unwrap_or(&"North");

        let seasonality =
            1.0 + SEASONALITY_AMPLITUDE * (2.0 * std::f64::consts::PI * i as f64 / 365.0).sin();
        // The schema requires non-negative sales; clamp the normal tail.
        let sales = (sales_dist.sample(&mut rng) * seasonality).max(0.0);
        let customers = customers_dist.sample(&mut rng) as u64;

        table.rows.push(vec![
            date.format("%Y-%m-%d").to_string(),
            product_id.to_string(),
            category.to_string(),
            format!("{:.4}", sales),
            customers.to_string(),
            region.to_string(),
        ]);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::etl::schema;

    fn config(seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2023, 3, 31).unwrap(),
            seed,
        }
    }

    #[test]
    fn test_one_row_per_day() {
        let table = generate(&config(42)).unwrap();
        assert_eq!(table.len(), 90);
        assert_eq!(table.headers, REQUIRED_COLUMNS.to_vec());
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let a = generate(&config(42)).unwrap();
        let b = generate(&config(42)).unwrap();
        assert_eq!(a.rows, b.rows);

        let c = generate(&config(7)).unwrap();
        assert_ne!(a.rows, c.rows);
    }

    #[test]
    fn test_output_passes_schema_validation() {
        let table = generate(&config(42)).unwrap();
        let records = schema::validate(&table).unwrap();
        assert_eq!(records.len(), 90);
        assert!(records.iter().all(|r| r.sales >= 0.0));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut cfg = config(42);
        cfg.end_date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        assert!(generate(&cfg).is_err());
    }
}
