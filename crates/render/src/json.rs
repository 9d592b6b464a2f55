//! JSON export of the report bundle.

use std::path::{Path, PathBuf};

use benchviz_core::ReportBundle;

use crate::{Artifact, Renderer, Result};

/// File name of the exported bundle.
pub const REPORT_JSON: &str = "report.json";

/// Writes the whole bundle as pretty-printed JSON.
pub struct JsonExport {
  output_dir: PathBuf,
}

impl JsonExport {
  pub fn new(output_dir: impl Into<PathBuf>) -> Self {
    Self {
      output_dir: output_dir.into(),
    }
  }

  /// Load a previously exported bundle.
  pub fn load(path: &Path) -> Result<ReportBundle> {
    let json = std::fs::read_to_string(path)?;
    let bundle = serde_json::from_str(&json)?;
    Ok(bundle)
  }
}

impl Renderer for JsonExport {
  fn name(&self) -> &'static str {
    "json"
  }

  fn render(&self, bundle: &ReportBundle) -> Result<Artifact> {
    std::fs::create_dir_all(&self.output_dir)?;
    let path = self.output_dir.join(REPORT_JSON);
    let json = serde_json::to_string_pretty(bundle)?;
    std::fs::write(&path, json)?;
    Ok(Artifact::Files(vec![path]))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use benchviz_core::{BenchmarkRecord, Measurements, MetricValue, RunMetadata, assemble};
  use tempfile::TempDir;

  #[test]
  fn test_save_and_load() {
    let temp = TempDir::new().unwrap();
    let records = vec![
      BenchmarkRecord::new(
        "A",
        "x",
        Measurements {
          sent: Some(MetricValue::Int(10)),
          received: Some(MetricValue::Int(0)),
          elapsed: Some(MetricValue::Float(0.5)),
        },
      )
      .with_config("mode", "tx"),
    ];
    let bundle = assemble(&records, RunMetadata::capture()).unwrap();

    let artifact = JsonExport::new(temp.path()).render(&bundle).unwrap();
    let loaded = JsonExport::load(&temp.path().join(REPORT_JSON)).unwrap();

    assert_eq!(artifact, Artifact::Files(vec![temp.path().join(REPORT_JSON)]));
    assert_eq!(loaded, bundle);
  }

  #[test]
  fn test_json_shape() {
    let temp = TempDir::new().unwrap();
    let records = vec![BenchmarkRecord::new(
      "A",
      "x",
      Measurements {
        sent: Some(MetricValue::Int(10)),
        received: Some(MetricValue::Int(20)),
        elapsed: Some(MetricValue::Float(1.5)),
      },
    )];
    let bundle = assemble(&records, RunMetadata::capture()).unwrap();

    JsonExport::new(temp.path()).render(&bundle).unwrap();
    let value: serde_json::Value =
      serde_json::from_str(&std::fs::read_to_string(temp.path().join(REPORT_JSON)).unwrap()).unwrap();

    assert_eq!(value["series"]["sent"]["values"][0], 10);
    assert_eq!(value["series"]["elapsed"]["values"][0], 1.5);
    assert_eq!(value["series"]["sent"]["comparison"]["cells"][0][0], "100%");
    assert_eq!(value["series"]["received"]["metric"], "received");
    assert!(value["metadata"]["host"].is_string());
  }
}
