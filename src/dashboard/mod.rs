//! Presentation aggregation: KPIs, grouped sums, forecast overlay
//!
//! Everything the presentation layer shows is assembled here; the layer itself
//! only renders. Filtering always happens first, producing a new owned view,
//! and the externally supplied results join in unchanged: correlation into the
//! KPIs, forecast sequences into the overlay, regional stats as pass-through.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::results::{AnalysisResults, RegionStat};
use crate::table::EnrichedRecord;

/// Aggregation was requested on a zero-row filtered view. Absolute forecast
/// dates and mean KPIs would be meaningless, so the whole build fails.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyInputError {
    pub filter: String,
}

impl std::fmt::Display for EmptyInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "dashboard aggregation: filtered view is empty ({})",
            self.filter
        )
    }
}

impl std::error::Error for EmptyInputError {}

/// Category/region filter applied before every aggregate. `None` means no
/// restriction on that axis.
#[derive(Debug, Clone, Default)]
pub struct DashboardFilter {
    categories: Option<Vec<String>>,
    regions: Option<Vec<String>>,
}

impl DashboardFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn regions(mut self, regions: Vec<String>) -> Self {
        self.regions = Some(regions);
        self
    }

    /// Produce a new filtered view; the input table is never mutated.
    pub fn apply(&self, records: &[EnrichedRecord]) -> Vec<EnrichedRecord> {
        records
            .iter()
            .filter(|r| {
                self.categories
                    .as_ref()
                    .map_or(true, |cs| cs.iter().any(|c| c == &r.category))
            })
            .filter(|r| {
                self.regions
                    .as_ref()
                    .map_or(true, |rs| rs.iter().any(|rg| rg == &r.region))
            })
            .cloned()
            .collect()
    }

    fn describe(&self) -> String {
        let fmt = |axis: &Option<Vec<String>>| match axis {
            Some(values) => values.join("|"),
            None => "*".to_string(),
        };
        format!(
            "categories={}, regions={}",
            fmt(&self.categories),
            fmt(&self.regions)
        )
    }
}

/// Scalar KPI cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    pub total_sales: f64,
    pub average_sale: f64,
    pub total_customers: u64,
    /// Sales/customers correlation, supplied by the external engine.
    pub correlation: f64,
}

/// Forecast sequences index-aligned to the N calendar days immediately after
/// the filtered view's latest date.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOverlay {
    pub dates: Vec<NaiveDate>,
    pub mean: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// The filtered view itself, for data display and CSV download.
    pub records: Vec<EnrichedRecord>,
    pub kpis: Kpis,
    /// Sum of sales per category, sorted by category name.
    pub sales_by_category: Vec<(String, f64)>,
    /// Sum of sales per calendar day, date-sorted; anchors the forecast line.
    pub daily_sales: Vec<(NaiveDate, f64)>,
    pub forecast: ForecastOverlay,
    /// Regional stats exactly as supplied, never recomputed from the view.
    pub regional: Vec<RegionStat>,
}

/// Build the dashboard aggregates from an enriched table and a validated
/// results bundle.
pub fn build(
    records: &[EnrichedRecord],
    filter: &DashboardFilter,
    results: &AnalysisResults,
) -> Result<Dashboard, EmptyInputError> {
    let view = filter.apply(records);
    if view.is_empty() {
        return Err(EmptyInputError {
            filter: filter.describe(),
        });
    }

    let total_sales: f64 = view.iter().map(|r| r.sales).sum();
    let total_customers: u64 = view.iter().map(|r| r.customers).sum();
    let kpis = Kpis {
        total_sales,
        average_sale: total_sales / view.len() as f64,
        total_customers,
        correlation: results.descriptive.correlation,
    };

    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in &view {
        *by_category.entry(record.category.clone()).or_insert(0.0) += record.sales;
        *by_date.entry(record.date).or_insert(0.0) += record.sales;
    }

    // by_date is non-empty here, so the max date exists.
    let last_date = *by_date.keys().next_back().unwrap_or(&view[0].date);
    let forecast = ForecastOverlay {
        dates: (1..=results.horizon() as i64)
            .map(|offset| last_date + Duration::days(offset))
            .collect(),
        mean: results.time_series.forecast_mean.clone(),
        upper: results.time_series.forecast_upper.clone(),
        lower: results.time_series.forecast_lower.clone(),
    };

    Ok(Dashboard {
        records: view,
        kpis,
        sales_by_category: by_category.into_iter().collect(),
        daily_sales: by_date.into_iter().collect(),
        forecast,
        regional: results.regional.regional_stats.clone(),
    })
}
