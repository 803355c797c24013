//! Transform stage: schema validation, feature derivation, rolling averages
//!
//! # Data flow
//!
//! ```text
//! RawTable → schema::validate → Vec<Record>
//!     ↓
//! features::derive (month, weekday, weekend, sales tier)
//!     ↓
//! rolling::apply_trailing_average (per-product trailing mean, degrade on
//! non-finite input)
//!     ↓
//! TransformOutcome { records, degraded }
//! ```

pub mod features;
pub mod pipeline;
pub mod rolling;
pub mod schema;

pub use pipeline::{PipelineStage, TransformOutcome, TransformPipeline};
pub use rolling::{PartitionComputeError, TRAILING_WINDOW};
pub use schema::SchemaError;
