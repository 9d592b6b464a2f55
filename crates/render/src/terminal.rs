//! Text bar charts for the console.

use std::fmt::Write as _;

use benchviz_core::{MetricReport, ReportBundle};

use crate::{Artifact, Renderer, Result};

/// Length in characters of the longest bar.
pub const DEFAULT_BAR_WIDTH: usize = 50;

/// Horizontal bar chart per metric, one bar per test in input order.
pub struct TerminalChart {
  bar_width: usize,
}

impl Default for TerminalChart {
  fn default() -> Self {
    Self {
      bar_width: DEFAULT_BAR_WIDTH,
    }
  }
}

impl TerminalChart {
  pub fn new(bar_width: usize) -> Self {
    Self {
      bar_width: bar_width.max(1),
    }
  }

  fn write_chart(&self, out: &mut String, names: &[String], report: &MetricReport) {
    let label_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    let max = report.values.iter().map(|v| v.as_f64()).fold(0.0_f64, f64::max);

    let _ = writeln!(out, "{}", report.metric.title());
    let _ = writeln!(out, "{}", report.metric.ylabel());
    let _ = writeln!(out);

    for (name, value) in names.iter().zip(&report.values) {
      let len = if max > 0.0 {
        ((value.as_f64().max(0.0) / max) * self.bar_width as f64).round() as usize
      } else {
        0
      };
      let _ = writeln!(
        out,
        "{:<width$} | {} {}",
        name,
        "█".repeat(len),
        value,
        width = label_width
      );
    }
    let _ = writeln!(out);
  }
}

impl Renderer for TerminalChart {
  fn name(&self) -> &'static str {
    "terminal"
  }

  fn render(&self, bundle: &ReportBundle) -> Result<Artifact> {
    let mut out = String::new();
    for report in bundle.series.iter() {
      self.write_chart(&mut out, &bundle.names, report);
    }
    Ok(Artifact::Printed(out))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use benchviz_core::{BenchmarkRecord, Measurements, MetricValue, RunMetadata, assemble};

  fn bundle(sent: &[i64]) -> ReportBundle {
    let records: Vec<_> = sent
      .iter()
      .enumerate()
      .map(|(i, &s)| {
        BenchmarkRecord::new(
          format!("t_{}", i),
          "k",
          Measurements {
            sent: Some(MetricValue::Int(s)),
            received: Some(MetricValue::Int(0)),
            elapsed: Some(MetricValue::Float(0.5)),
          },
        )
      })
      .collect();
    assemble(&records, RunMetadata::capture()).unwrap()
  }

  fn printed(artifact: Artifact) -> String {
    match artifact {
      Artifact::Printed(s) => s,
      other => panic!("expected printed output, got {:?}", other),
    }
  }

  #[test]
  fn test_render_titles_and_order() {
    let out = printed(TerminalChart::new(10).render(&bundle(&[100, 200])).unwrap());

    let sent = out.find("Sent Statistics").unwrap();
    let received = out.find("Received Statistics").unwrap();
    let elapsed = out.find("Elapsed Statistics").unwrap();
    assert!(sent < received && received < elapsed);
    assert!(out.contains("Sent [B]"));
    assert!(out.contains("Elapsed [s]"));

    // Unescaped names, first record first
    let a = out.find("t_0 (k)").unwrap();
    let b = out.find("t_1 (k)").unwrap();
    assert!(a < b);
  }

  #[test]
  fn test_bar_lengths_scale_to_max() {
    let out = printed(TerminalChart::new(10).render(&bundle(&[100, 200])).unwrap());

    assert!(out.contains(&format!("t_0 (k) | {} 100", "█".repeat(5))));
    assert!(out.contains(&format!("t_1 (k) | {} 200", "█".repeat(10))));
  }

  #[test]
  fn test_all_zero_draws_no_bars() {
    let out = printed(TerminalChart::new(10).render(&bundle(&[1, 2])).unwrap());

    assert!(out.contains("t_0 (k) |  0"));
  }

  #[test]
  fn test_negative_value_draws_no_bar() {
    let out = printed(TerminalChart::new(10).render(&bundle(&[-5, 10])).unwrap());

    assert!(out.contains("t_0 (k) |  -5"));
  }
}
