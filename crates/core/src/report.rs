//! Report bundle handed to renderers.

use crate::Result;
use crate::comparison::{ComparisonMatrix, build_comparison};
use crate::configuration::{ConfigurationTable, collate};
use crate::record::{BenchmarkRecord, Metric, MetricValue, display_name};
use crate::series::MetricSeries;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sysinfo::System;

/// Where and when a report was generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
  /// Host identity in uname order: system, node, kernel release, OS version, machine
  pub host: String,
  /// Report generation timestamp
  pub generated_at: DateTime<Utc>,
}

impl RunMetadata {
  /// Metadata for a report generated now on this machine.
  pub fn capture() -> Self {
    let hostname = hostname::get()
      .ok()
      .and_then(|h| h.into_string().ok())
      .unwrap_or_else(|| "unknown".to_string());

    let unknown = || "unknown".to_string();
    let host = [
      std::env::consts::OS.to_string(),
      hostname,
      System::kernel_version().unwrap_or_else(unknown),
      System::os_version().unwrap_or_else(unknown),
      std::env::consts::ARCH.to_string(),
    ]
    .join(", ");

    Self {
      host,
      generated_at: Utc::now(),
    }
  }
}

/// Chart series and comparison matrix for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
  pub metric: Metric,
  /// Escaped display names, for chart labels
  pub labels: Vec<String>,
  pub values: Vec<MetricValue>,
  pub comparison: ComparisonMatrix,
}

impl MetricReport {
  fn from_series(series: MetricSeries) -> Self {
    let comparison = build_comparison(&series.values);
    Self {
      metric: series.metric,
      labels: series.labels,
      values: series.values,
      comparison,
    }
  }
}

/// The three per-metric reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSet {
  pub sent: MetricReport,
  pub received: MetricReport,
  pub elapsed: MetricReport,
}

impl SeriesSet {
  pub fn get(&self, metric: Metric) -> &MetricReport {
    match metric {
      Metric::Sent => &self.sent,
      Metric::Received => &self.received,
      Metric::Elapsed => &self.elapsed,
    }
  }

  /// Reports in `Metric::all()` order.
  pub fn iter(&self) -> impl Iterator<Item = &MetricReport> {
    Metric::all().iter().map(|m| self.get(*m))
  }
}

/// Everything a renderer needs to draw charts or write a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBundle {
  /// Unescaped display names in record order; row and column labels of tables
  pub names: Vec<String>,
  pub series: SeriesSet,
  pub configuration_table: ConfigurationTable,
  pub metadata: RunMetadata,
}

impl ReportBundle {
  /// Assemble a bundle stamped with the current host and time.
  pub fn assemble(records: &[BenchmarkRecord]) -> Result<Self> {
    assemble(records, RunMetadata::capture())
  }
}

/// Reduce `records` into a [`ReportBundle`].
///
/// Fails on the first malformed input; no partial bundle is produced.
pub fn assemble(records: &[BenchmarkRecord], metadata: RunMetadata) -> Result<ReportBundle> {
  let sent = MetricSeries::collect(records, Metric::Sent)?;
  let received = MetricSeries::collect(records, Metric::Received)?;
  let elapsed = MetricSeries::collect(records, Metric::Elapsed)?;

  let series = SeriesSet {
    sent: MetricReport::from_series(sent),
    received: MetricReport::from_series(received),
    elapsed: MetricReport::from_series(elapsed),
  };

  let configuration_table = collate(records)?;
  let names = records.iter().map(|r| display_name(r, false)).collect();

  tracing::debug!(
    records = records.len(),
    config_keys = configuration_table.rows.len(),
    "Assembled report bundle"
  );

  Ok(ReportBundle {
    names,
    series,
    configuration_table,
    metadata,
  })
}
