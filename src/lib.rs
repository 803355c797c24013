//! salesflow - Sales ETL and dashboard aggregation
//!
//! # Architecture
//!
//! ```text
//! generator (synthetic RawTable)          external statistical engine
//!     ↓                                           ↓
//! etl::TransformPipeline                  results::AnalysisResults (JSON)
//!   (validate → derive features → trailing averages)
//!     ↓                                           ↓
//! persist (CSV + SQLite + metadata)               ↓
//!     ↓                                           ↓
//! persist::TableCache → dashboard::build(view, filter, results)
//!     ↓
//! KPIs, grouped aggregates, forecast overlay, regional pass-through
//! ```

pub mod config;
pub mod dashboard;
pub mod etl;
pub mod generator;
pub mod persist;
pub mod results;
pub mod table;

pub use config::EtlConfig;
pub use dashboard::{Dashboard, DashboardFilter, EmptyInputError, ForecastOverlay, Kpis};
pub use etl::{PartitionComputeError, SchemaError, TransformOutcome, TransformPipeline};
pub use generator::GeneratorConfig;
pub use persist::{RunMetadata, SalesDb, TableCache};
pub use results::{AnalysisResults, RegionStat, ResultsError};
pub use table::{EnrichedRecord, RawTable, Record, SalesTier};
