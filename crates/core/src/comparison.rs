//! Pairwise percentage comparison between test runs.

use crate::record::MetricValue;
use serde::{Deserialize, Serialize};

/// Square table of percentage strings.
///
/// Cell `(i, j)` reads "value i is N% of value j". Rows and columns follow
/// the order of the values the matrix was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonMatrix {
  pub cells: Vec<Vec<String>>,
}

impl ComparisonMatrix {
  /// Number of rows (and columns).
  pub fn dim(&self) -> usize {
    self.cells.len()
  }

  pub fn get(&self, row: usize, col: usize) -> Option<&str> {
    self.cells.get(row).and_then(|r| r.get(col)).map(String::as_str)
  }

  pub fn rows(&self) -> impl Iterator<Item = &[String]> {
    self.cells.iter().map(Vec::as_slice)
  }
}

/// Build the NxN comparison matrix for `values`.
pub fn build_comparison(values: &[MetricValue]) -> ComparisonMatrix {
  let cells = values
    .iter()
    .enumerate()
    .map(|(i, &num)| {
      values
        .iter()
        .enumerate()
        .map(|(j, &den)| {
          if i == j {
            // Never divide a value by itself; float noise could read 99% or 101%
            "100%".to_string()
          } else if den.is_zero() {
            "0%".to_string()
          } else {
            format!("{}%", percent(num, den))
          }
        })
        .collect()
    })
    .collect();

  ComparisonMatrix { cells }
}

/// `num * 100 / den` for a non-zero `den`, formatted without a sign on zero.
fn percent(num: MetricValue, den: MetricValue) -> String {
  match (num, den) {
    (MetricValue::Int(n), MetricValue::Int(d)) => floor_div(n.saturating_mul(100), d).to_string(),
    _ => {
      let ratio = (num.as_f64() * 100.0 / den.as_f64()).round() + 0.0;
      format!("{:.0}", ratio)
    }
  }
}

/// Integer division rounding towards negative infinity.
fn floor_div(n: i64, d: i64) -> i64 {
  let q = n.checked_div(d).unwrap_or(i64::MAX);
  let r = n.checked_rem(d).unwrap_or(0);
  if r != 0 && ((r < 0) != (d < 0)) { q - 1 } else { q }
}
