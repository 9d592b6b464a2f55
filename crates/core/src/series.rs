//! Per-metric labeled series.

use crate::record::{BenchmarkRecord, Metric, MetricValue};
use crate::{ReportError, Result};
use serde::{Deserialize, Serialize};

/// Labels and values of one metric across all records.
///
/// `labels[i]` and `values[i]` both belong to the i-th input record. Charts
/// place bars by index, so the order must never be changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
  pub metric: Metric,
  /// Escaped display names
  pub labels: Vec<String>,
  pub values: Vec<MetricValue>,
}

impl MetricSeries {
  pub fn collect(records: &[BenchmarkRecord], metric: Metric) -> Result<Self> {
    let mut labels = Vec::with_capacity(records.len());
    let mut values = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
      let value = record.result.get(metric).ok_or(ReportError::MissingField {
        index,
        field: metric.name(),
      })?;
      labels.push(record.display_name(true));
      values.push(value);
    }

    Ok(Self { metric, labels, values })
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Label/value pairs in record order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, MetricValue)> {
    self.labels.iter().map(String::as_str).zip(self.values.iter().copied())
  }
}

/// Build the series for `metric` ("sent", "received" or "elapsed").
pub fn build_series(records: &[BenchmarkRecord], metric: &str) -> Result<MetricSeries> {
  let metric: Metric = metric.parse()?;
  MetricSeries::collect(records, metric)
}
