//! SVG bar charts, one file per metric.

use std::path::{Path, PathBuf};

use benchviz_core::{MetricReport, ReportBundle};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::{Artifact, RenderError, Renderer, Result};

/// Default image size in pixels.
pub const DEFAULT_CHART_SIZE: (u32, u32) = (1000, 600);

const TITLE_FONT_SIZE: u32 = 32;
const AXIS_LABEL_FONT_SIZE: u32 = 20;
const TICK_LABEL_FONT_SIZE: u32 = 13;
const DATA_LABEL_FONT_SIZE: u32 = 13;

const BAR_COLOR: RGBColor = RGBColor(66, 133, 244);

fn chart_err(e: impl std::fmt::Display) -> RenderError {
  RenderError::Chart(e.to_string())
}

/// Writes `sent.svg`, `received.svg` and `elapsed.svg` into a directory.
pub struct SvgCharts {
  output_dir: PathBuf,
  size: (u32, u32),
}

impl SvgCharts {
  pub fn new(output_dir: impl Into<PathBuf>) -> Self {
    Self {
      output_dir: output_dir.into(),
      size: DEFAULT_CHART_SIZE,
    }
  }

  pub fn with_size(mut self, width: u32, height: u32) -> Self {
    self.size = (width.max(100), height.max(100));
    self
  }

  /// Path of the chart for `report` inside the output directory.
  pub fn chart_path(&self, report: &MetricReport) -> PathBuf {
    self.output_dir.join(format!("{}.svg", report.metric.name()))
  }

  fn draw(&self, path: &Path, names: &[String], report: &MetricReport) -> Result<()> {
    let root = SVGBackend::new(path, self.size).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let n = report.values.len();
    let values: Vec<f64> = report.values.iter().map(|v| v.as_f64().max(0.0)).collect();
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    // Headroom for the value labels above the bars
    let y_max = if max > 0.0 { max * 1.15 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
      .caption(report.metric.title(), ("sans-serif", TITLE_FONT_SIZE))
      .margin(20)
      .x_label_area_size(50)
      .y_label_area_size(90)
      .build_cartesian_2d((0..n).into_segmented(), 0.0..y_max)
      .map_err(chart_err)?;

    chart
      .configure_mesh()
      .disable_x_mesh()
      .x_labels(n + 1)
      .x_label_formatter(&|x: &SegmentValue<usize>| match x {
        SegmentValue::CenterOf(i) => names.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
      })
      .y_desc(report.metric.ylabel())
      .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
      .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
      .draw()
      .map_err(chart_err)?;

    chart
      .draw_series(
        Histogram::vertical(&chart)
          .style(BAR_COLOR.mix(0.5).filled())
          .margin(10)
          .data(values.iter().enumerate().map(|(i, v)| (i, *v))),
      )
      .map_err(chart_err)?;

    let label_style = ("sans-serif", DATA_LABEL_FONT_SIZE as f64)
      .into_font()
      .color(&BLACK)
      .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart
      .draw_series(report.values.iter().zip(&values).enumerate().map(|(i, (raw, v))| {
        Text::new(raw.to_string(), (SegmentValue::CenterOf(i), *v), label_style.clone())
      }))
      .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
  }
}

impl Renderer for SvgCharts {
  fn name(&self) -> &'static str {
    "svg"
  }

  fn render(&self, bundle: &ReportBundle) -> Result<Artifact> {
    std::fs::create_dir_all(&self.output_dir)?;

    let mut files = Vec::with_capacity(3);
    for report in bundle.series.iter() {
      let path = self.chart_path(report);
      self.draw(&path, &bundle.names, report)?;
      tracing::debug!("Wrote chart {}", path.display());
      files.push(path);
    }

    Ok(Artifact::Files(files))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use benchviz_core::{BenchmarkRecord, Measurements, MetricValue, RunMetadata, assemble};
  use tempfile::TempDir;

  fn sample_bundle() -> ReportBundle {
    let records = vec![
      BenchmarkRecord::new(
        "send_file",
        "af_ktls",
        Measurements {
          sent: Some(MetricValue::Int(4096)),
          received: Some(MetricValue::Int(0)),
          elapsed: Some(MetricValue::Float(1.25)),
        },
      ),
      BenchmarkRecord::new(
        "send_file",
        "openssl",
        Measurements {
          sent: Some(MetricValue::Int(2048)),
          received: Some(MetricValue::Int(0)),
          elapsed: Some(MetricValue::Float(2.5)),
        },
      ),
    ];
    assemble(&records, RunMetadata::capture()).unwrap()
  }

  #[test]
  fn test_writes_one_svg_per_metric() {
    let temp = TempDir::new().unwrap();
    let renderer = SvgCharts::new(temp.path().join("charts")).with_size(640, 480);

    let artifact = renderer.render(&sample_bundle()).unwrap();

    let Artifact::Files(files) = artifact else {
      panic!("expected files");
    };
    let names: Vec<_> = files
      .iter()
      .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
      .collect();
    assert_eq!(names, vec!["sent.svg", "received.svg", "elapsed.svg"]);

    let svg = std::fs::read_to_string(&files[0]).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Sent Statistics"));
    assert!(svg.contains("send_file (af_ktls)"));
  }

  #[test]
  fn test_all_zero_series_still_draws() {
    let temp = TempDir::new().unwrap();
    let renderer = SvgCharts::new(temp.path());

    renderer.render(&sample_bundle()).unwrap();

    let svg = std::fs::read_to_string(temp.path().join("received.svg")).unwrap();
    assert!(svg.contains("Received Statistics"));
  }
}
