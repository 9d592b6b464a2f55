//! Static HTML report with stats, comparison and configuration tables.

use std::fmt::Write as _;
use std::path::PathBuf;

use benchviz_core::{ComparisonMatrix, ConfigurationTable, Metric, MetricReport, ReportBundle};
use minijinja::{AutoEscape, Environment, Value, context, path_loader};

use crate::{Artifact, Renderer, Result};

/// File name of the generated report.
pub const INDEX_HTML: &str = "index.html";

const DEFAULT_TEMPLATE: &str = include_str!("../templates/report.html");
const TEMPLATE_NAME: &str = "report";

/// Renders `index.html` from a Jinja template.
///
/// Available variables: `sent_stats`, `sent_cmp`, `received_stats`,
/// `received_cmp`, `elapsed_stats`, `elapsed_cmp`, `configurations` and
/// `info` (with `uname` and `generated`). Tables are inserted as ready-made
/// HTML; output is not auto-escaped. A custom template may `{% include %}`
/// files next to it.
pub struct HtmlReport {
  output_dir: PathBuf,
  template: Option<PathBuf>,
}

impl HtmlReport {
  pub fn new(output_dir: impl Into<PathBuf>) -> Self {
    Self {
      output_dir: output_dir.into(),
      template: None,
    }
  }

  /// Use a template file instead of the built-in one.
  pub fn with_template(mut self, template: Option<PathBuf>) -> Self {
    self.template = template;
    self
  }

  pub fn index_path(&self) -> PathBuf {
    self.output_dir.join(INDEX_HTML)
  }

  /// Render the report document without writing it.
  pub fn to_html(&self, bundle: &ReportBundle) -> Result<String> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);

    match &self.template {
      Some(path) => {
        tracing::debug!("Using HTML template {}", path.display());
        let source = std::fs::read_to_string(path)?;
        if let Some(dir) = path.parent() {
          env.set_loader(path_loader(dir));
        }
        env.add_template_owned(TEMPLATE_NAME, source)?;
      }
      None => env.add_template(TEMPLATE_NAME, DEFAULT_TEMPLATE)?,
    }

    let template = env.get_template(TEMPLATE_NAME)?;
    Ok(template.render(template_context(bundle))?)
  }
}

impl Renderer for HtmlReport {
  fn name(&self) -> &'static str {
    "html"
  }

  fn render(&self, bundle: &ReportBundle) -> Result<Artifact> {
    let html = self.to_html(bundle)?;
    std::fs::create_dir_all(&self.output_dir)?;
    let path = self.index_path();
    std::fs::write(&path, html)?;
    Ok(Artifact::Files(vec![path]))
  }
}

fn stats_column(metric: Metric) -> &'static str {
  match metric {
    Metric::Sent => "Sent bytes",
    Metric::Received => "Received bytes",
    Metric::Elapsed => "Elapsed",
  }
}

fn template_context(bundle: &ReportBundle) -> Value {
  let names = &bundle.names;
  let series = &bundle.series;

  context! {
    sent_stats => stats_table(names, &series.sent),
    sent_cmp => comparison_table(names, &series.sent.comparison),
    received_stats => stats_table(names, &series.received),
    received_cmp => comparison_table(names, &series.received.comparison),
    elapsed_stats => stats_table(names, &series.elapsed),
    elapsed_cmp => comparison_table(names, &series.elapsed.comparison),
    configurations => configuration_table(names, &bundle.configuration_table),
    info => context! {
      uname => escape_html(&bundle.metadata.host),
      generated => bundle.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    },
  }
}

fn stats_table(names: &[String], report: &MetricReport) -> String {
  let rows = names
    .iter()
    .zip(&report.values)
    .map(|(name, value)| (name.as_str(), vec![value.to_string()]));
  table(&[stats_column(report.metric).to_string()], rows)
}

fn comparison_table(names: &[String], matrix: &ComparisonMatrix) -> String {
  let rows = names.iter().zip(matrix.rows()).map(|(name, row)| (name.as_str(), row.to_vec()));
  table(names, rows)
}

fn configuration_table(names: &[String], config: &ConfigurationTable) -> String {
  let rows = config.rows.iter().map(|row| (row.key.as_str(), row.values.clone()));
  table(names, rows)
}

/// A table with a header row of `columns` and one labeled row per item.
fn table<'a>(columns: &[String], rows: impl Iterator<Item = (&'a str, Vec<String>)>) -> String {
  let mut out = String::new();

  let _ = writeln!(out, "<table border=\"1\" class=\"dataframe\">");
  let _ = writeln!(out, "  <thead>");
  let _ = write!(out, "    <tr><th></th>");
  for column in columns {
    let _ = write!(out, "<th>{}</th>", escape_html(column));
  }
  let _ = writeln!(out, "</tr>");
  let _ = writeln!(out, "  </thead>");
  let _ = writeln!(out, "  <tbody>");
  for (label, cells) in rows {
    let _ = write!(out, "    <tr><th>{}</th>", escape_html(label));
    for cell in &cells {
      let _ = write!(out, "<td>{}</td>", escape_html(cell));
    }
    let _ = writeln!(out, "</tr>");
  }
  let _ = writeln!(out, "  </tbody>");
  let _ = write!(out, "</table>");

  out
}

fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}
