//! Data reduction for benchmark reports.
//!
//! Turns an ordered list of benchmark records into the structures a renderer
//! needs: per-metric labeled series, pairwise percentage comparison matrices
//! and an aligned configuration table.
//!
//! ## Key Concepts
//!
//! - **Records**: validated at the JSON boundary, order is display order
//! - **Series**: one label and one value per record, for a single metric
//! - **Comparison**: NxN table of `value[i] * 100 / value[j]` percentages
//! - **Configuration**: key x test table with `" - "` for absent keys
//! - **Bundle**: everything above plus run metadata, handed to renderers

mod comparison;
mod configuration;
mod error;
mod record;
mod report;
mod series;

pub use comparison::{ComparisonMatrix, build_comparison};
pub use configuration::{CONFIG_PLACEHOLDER, ConfigRow, ConfigurationTable, collate};
pub use error::{ReportError, Result};
pub use record::{BenchmarkRecord, Measurements, Metric, MetricValue, display_name, parse_records, parse_records_from_reader};
pub use report::{MetricReport, ReportBundle, RunMetadata, SeriesSet, assemble};
pub use series::{MetricSeries, build_series};
