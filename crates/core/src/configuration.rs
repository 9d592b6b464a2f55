//! Aligned configuration table across test runs.

use crate::record::BenchmarkRecord;
use crate::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cell value for a record that does not set a key.
pub const CONFIG_PLACEHOLDER: &str = " - ";

/// One configuration key and its value for every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRow {
  pub key: String,
  pub values: Vec<String>,
}

/// Configuration keys in first-seen order, each aligned to record order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationTable {
  pub rows: Vec<ConfigRow>,
  /// Number of records (columns)
  pub columns: usize,
}

impl ConfigurationTable {
  pub fn get(&self, key: &str) -> Option<&[String]> {
    self.rows.iter().find(|r| r.key == key).map(|r| r.values.as_slice())
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.rows.iter().map(|r| r.key.as_str())
  }
}

/// Merge every record's configuration into one table.
pub fn collate(records: &[BenchmarkRecord]) -> Result<ConfigurationTable> {
  if records.is_empty() {
    return Err(ReportError::NoRecords);
  }

  let columns = records.len();
  let mut rows: Vec<ConfigRow> = Vec::new();
  let mut row_index: HashMap<&str, usize> = HashMap::new();

  for (idx, record) in records.iter().enumerate() {
    for (key, value) in &record.configuration {
      let row = *row_index.entry(key.as_str()).or_insert_with(|| {
        rows.push(ConfigRow {
          key: key.clone(),
          values: vec![CONFIG_PLACEHOLDER.to_string(); columns],
        });
        rows.len() - 1
      });
      rows[row].values[idx] = value.clone();
    }
  }

  Ok(ConfigurationTable { rows, columns })
}
