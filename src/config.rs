//! Environment-driven configuration for the ETL and dashboard binaries

use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct EtlConfig {
    pub data_dir: PathBuf,
    pub csv_path: PathBuf,
    pub db_path: PathBuf,
    pub results_path: PathBuf,
    pub metadata_path: PathBuf,
    pub seed: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl EtlConfig {
    /// Build from environment variables, with defaults for every knob:
    ///
    /// - `SALES_DATA_DIR` (default `data`)
    /// - `SALES_SEED` (default 42)
    /// - `SALES_START_DATE` / `SALES_END_DATE` (defaults 2023-01-01 and
    ///   2024-01-01, end inclusive)
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir =
            PathBuf::from(env::var("SALES_DATA_DIR").unwrap_or_else(|_| "data".to_string()));

        let seed = parse_var("SALES_SEED", 42u64)?;
        let start_date = parse_date_var("SALES_START_DATE", "2023-01-01")?;
        let end_date = parse_date_var("SALES_END_DATE", "2024-01-01")?;
        if end_date < start_date {
            return Err(ConfigError::InvalidValue(
                "SALES_END_DATE must not precede SALES_START_DATE".to_string(),
            ));
        }

        Ok(Self {
            csv_path: data_dir.join("processed_sales.csv"),
            db_path: data_dir.join("sales_database.db"),
            results_path: data_dir.join("analysis_results.json"),
            metadata_path: data_dir.join("etl_metadata.json"),
            data_dir,
            seed,
            start_date,
            end_date,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(format!("{} = '{}'", name, raw))),
        Err(_) => Ok(default),
    }
}

fn parse_date_var(name: &str, default: &str) -> Result<NaiveDate, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
        ConfigError::InvalidValue(format!("{} = '{}' (expected YYYY-MM-DD)", name, raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 4] = [
        "SALES_DATA_DIR",
        "SALES_SEED",
        "SALES_START_DATE",
        "SALES_END_DATE",
    ];

    // Env vars are process-wide, so defaults, overrides, and failures are
    // exercised sequentially in one test.
    #[test]
    fn test_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = EtlConfig::from_env().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.csv_path, config.data_dir.join("processed_sales.csv"));
        assert_eq!(config.db_path, config.data_dir.join("sales_database.db"));
        assert_eq!(
            config.results_path,
            config.data_dir.join("analysis_results.json")
        );
        assert_eq!(config.seed, 42);
        assert!(config.start_date < config.end_date);

        env::set_var("SALES_SEED", "7");
        env::set_var("SALES_DATA_DIR", "scratch");
        let config = EtlConfig::from_env().unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.csv_path, PathBuf::from("scratch/processed_sales.csv"));

        env::set_var("SALES_SEED", "not-a-number");
        let err = EtlConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("SALES_SEED"));

        env::set_var("SALES_SEED", "7");
        env::set_var("SALES_END_DATE", "2022-01-01");
        let err = EtlConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("SALES_END_DATE"));

        for var in VARS {
            env::remove_var(var);
        }
    }
}
