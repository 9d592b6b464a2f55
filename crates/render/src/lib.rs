//! Renderers for benchmark report bundles.
//!
//! - Terminal: bar charts printed as text
//! - SVG: one bar chart image per metric
//! - HTML: static report with stats, comparison and configuration tables
//! - JSON: the whole bundle, machine-readable

mod chart;
mod html;
mod json;
mod terminal;

use std::path::PathBuf;

use benchviz_core::ReportBundle;
use thiserror::Error;

pub use chart::{DEFAULT_CHART_SIZE, SvgCharts};
pub use html::{HtmlReport, INDEX_HTML};
pub use json::{JsonExport, REPORT_JSON};
pub use terminal::{DEFAULT_BAR_WIDTH, TerminalChart};

/// Render-specific errors
#[derive(Debug, Error)]
pub enum RenderError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Chart error: {0}")]
  Chart(String),

  #[error("Template error: {0}")]
  Template(#[from] minijinja::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Output of a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
  /// Text meant for stdout
  Printed(String),
  /// Files written to disk
  Files(Vec<PathBuf>),
}

/// Anything that turns a [`ReportBundle`] into a visual artifact.
pub trait Renderer {
  fn name(&self) -> &'static str;

  fn render(&self, bundle: &ReportBundle) -> Result<Artifact>;
}
