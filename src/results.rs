//! Externally computed analysis results bundle
//!
//! The statistical engine runs outside this crate and hands over a JSON
//! document with three sections: descriptive stats, a forecast, and regional
//! market shares. This module only parses and validates that contract; none
//! of the numbers are recomputed here.

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResults {
    pub descriptive: Descriptive,
    pub time_series: TimeSeries,
    pub regional: Regional,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Descriptive {
    /// Correlation between sales and customers, passed through to the KPIs.
    pub correlation: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeSeries {
    pub forecast_mean: Vec<f64>,
    pub forecast_upper: Vec<f64>,
    pub forecast_lower: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Regional {
    pub regional_stats: Vec<RegionStat>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegionStat {
    pub region: String,
    pub total_sales: f64,
    pub market_share: f64,
}

/// Tolerance for the market-share sum check.
const SHARE_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug)]
pub enum ResultsError {
    Io(std::io::Error),
    /// JSON parse failure, including missing sections or keys.
    Parse(serde_json::Error),
    LengthMismatch {
        mean: usize,
        upper: usize,
        lower: usize,
    },
    /// `forecast_lower[i] <= forecast_mean[i] <= forecast_upper[i]` violated.
    BoundViolation { index: usize },
    EmptyForecast,
    EmptyRegional,
    ShareSum { sum: f64 },
}

impl std::fmt::Display for ResultsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultsError::Io(e) => write!(f, "results bundle: read failed: {}", e),
            ResultsError::Parse(e) => write!(f, "results bundle: malformed document: {}", e),
            ResultsError::LengthMismatch { mean, upper, lower } => write!(
                f,
                "results bundle: forecast lengths differ (mean {}, upper {}, lower {})",
                mean, upper, lower
            ),
            ResultsError::BoundViolation { index } => write!(
                f,
                "results bundle: forecast bounds inverted at index {}",
                index
            ),
            ResultsError::EmptyForecast => {
                write!(f, "results bundle: forecast sequences are empty")
            }
            ResultsError::EmptyRegional => {
                write!(f, "results bundle: regional_stats is empty")
            }
            ResultsError::ShareSum { sum } => write!(
                f,
                "results bundle: market shares sum to {} instead of 1",
                sum
            ),
        }
    }
}

impl std::error::Error for ResultsError {}

impl From<std::io::Error> for ResultsError {
    fn from(err: std::io::Error) -> Self {
        ResultsError::Io(err)
    }
}

impl From<serde_json::Error> for ResultsError {
    fn from(err: serde_json::Error) -> Self {
        ResultsError::Parse(err)
    }
}

impl AnalysisResults {
    /// Parse and validate a results bundle from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ResultsError> {
        let results: AnalysisResults = serde_json::from_str(json)?;
        results.validate()?;
        Ok(results)
    }

    /// Parse and validate a results bundle from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ResultsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Number of forecast points (N). Valid bundles have all three sequences
    /// at this length.
    pub fn horizon(&self) -> usize {
        self.time_series.forecast_mean.len()
    }

    fn validate(&self) -> Result<(), ResultsError> {
        let ts = &self.time_series;
        if ts.forecast_mean.len() != ts.forecast_upper.len()
            || ts.forecast_mean.len() != ts.forecast_lower.len()
        {
            return Err(ResultsError::LengthMismatch {
                mean: ts.forecast_mean.len(),
                upper: ts.forecast_upper.len(),
                lower: ts.forecast_lower.len(),
            });
        }
        if ts.forecast_mean.is_empty() {
            return Err(ResultsError::EmptyForecast);
        }

        for i in 0..ts.forecast_mean.len() {
            if ts.forecast_lower[i] > ts.forecast_mean[i]
                || ts.forecast_mean[i] > ts.forecast_upper[i]
            {
                return Err(ResultsError::BoundViolation { index: i });
            }
        }

        if self.regional.regional_stats.is_empty() {
            return Err(ResultsError::EmptyRegional);
        }
        let sum: f64 = self
            .regional
            .regional_stats
            .iter()
            .map(|s| s.market_share)
            .sum();
        if (sum - 1.0).abs() > SHARE_SUM_TOLERANCE {
            return Err(ResultsError::ShareSum { sum });
        }

        Ok(())
    }
}
