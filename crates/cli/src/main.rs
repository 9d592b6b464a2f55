//! Visualisation for benchmark JSON reports.
//!
//! Reads a JSON array of benchmark records (from a file or stdin) and either
//! prints bar charts to the terminal or writes SVG charts plus a static HTML
//! report with comparison tables.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use benchviz_core::{BenchmarkRecord, ReportBundle, parse_records_from_reader};
use clap::Parser;
use render::{Artifact, HtmlReport, JsonExport, Renderer, SvgCharts, TerminalChart};
use tracing::{debug, error, info, warn};

use self::{
  browse::open_in_browser,
  config::Config,
  logging::{LogConfig, init_logging},
};

mod browse;
mod config;
mod logging;

const DEFAULT_OUTPUT_DIR: &str = "./benchviz-output";

#[derive(Parser)]
#[command(name = "benchviz")]
#[command(about = "Visualisation tool for benchmark JSON reports")]
#[command(version)]
struct Cli {
  /// Input JSON file; the default is stdin
  #[arg(short, long)]
  input: Option<PathBuf>,

  /// Output directory
  #[arg(short, long)]
  output_dir: Option<PathBuf>,

  /// Output statistics in HTML instead of terminal charts
  #[arg(long)]
  html_stats: bool,

  /// HTML template for HTML output
  #[arg(long, requires = "html_stats")]
  html_stats_template: Option<PathBuf>,

  /// Browse generated HTML output
  #[arg(short = 'b', long, requires = "html_stats")]
  html_browse: bool,

  /// Also write the computed report as JSON
  #[arg(long)]
  json: bool,

  /// Show the full error chain when something fails
  #[arg(short, long)]
  debug: bool,

  /// Do not use colorized output
  #[arg(long)]
  no_color: bool,

  /// Config file (defaults to ./.benchviz.toml, then the user config)
  #[arg(long)]
  config: Option<PathBuf>,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
  let loaded = match Config::load(cli.config.as_deref(), &cwd) {
    Ok(loaded) => loaded,
    Err(e) => {
      // Logging is configured from the config, so it is not up yet
      eprintln!("ERROR: {:#}", e);
      return ExitCode::FAILURE;
    }
  };

  init_logging(&LogConfig::new(cli.debug, cli.no_color, &loaded.config));

  if let Some(source) = &loaded.source {
    debug!("Loaded config from {}", source.display());
  }
  for (path, reason) in &loaded.skipped {
    warn!("Ignoring config {}: {}", path.display(), reason);
  }

  match run(&cli, &loaded.config) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      if cli.debug {
        error!("{:?}", e);
      } else {
        error!("{:#}", e);
      }
      ExitCode::FAILURE
    }
  }
}

fn run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
  info!("parsing input");
  let records = read_records(cli.input.as_deref())?;
  let bundle = ReportBundle::assemble(&records).context("failed to build report")?;

  let output_dir = cli
    .output_dir
    .clone()
    .or_else(|| config.output_dir.clone())
    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

  info!("generating plots");
  if cli.html_stats {
    let charts = SvgCharts::new(&output_dir).with_size(config.chart.width, config.chart.height);
    emit(&charts, &bundle)?;

    info!("generating HTML output");
    let template = cli
      .html_stats_template
      .clone()
      .or_else(|| config.html_template.clone());
    let html = HtmlReport::new(&output_dir).with_template(template);
    emit(&html, &bundle)?;

    if cli.html_browse {
      info!("opening browser");
      open_in_browser(&html.index_path())?;
    }
  } else {
    emit(&TerminalChart::new(config.chart.bar_width), &bundle)?;
  }

  if cli.json {
    emit(&JsonExport::new(&output_dir), &bundle)?;
  }

  Ok(())
}

/// Read benchmark records from `input`, or stdin when `None`.
fn read_records(input: Option<&Path>) -> anyhow::Result<Vec<BenchmarkRecord>> {
  let records = match input {
    Some(path) => {
      let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
      parse_records_from_reader(BufReader::new(file)).with_context(|| format!("invalid input {}", path.display()))?
    }
    None => parse_records_from_reader(std::io::stdin().lock()).context("invalid input on stdin")?,
  };
  debug!("Read {} records", records.len());
  Ok(records)
}

fn emit(renderer: &dyn Renderer, bundle: &ReportBundle) -> anyhow::Result<()> {
  let artifact = renderer
    .render(bundle)
    .with_context(|| format!("{} renderer failed", renderer.name()))?;

  match artifact {
    Artifact::Printed(text) => print!("{}", text),
    Artifact::Files(files) => {
      for file in files {
        info!("wrote {}", file.display());
      }
    }
  }
  Ok(())
}
