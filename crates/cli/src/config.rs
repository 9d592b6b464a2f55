//! Configuration with per-project overrides.
//!
//! Priority: `--config` path > project (./.benchviz.toml) > user (~/.config/benchviz/config.toml) > defaults.
//! Command-line flags override whatever the loaded file sets.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-relative config file name
pub const PROJECT_CONFIG_FILE: &str = ".benchviz.toml";

/// Chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
  /// SVG width in pixels
  pub width: u32,
  /// SVG height in pixels
  pub height: u32,
  /// Longest terminal bar in characters
  pub bar_width: usize,
}

impl Default for ChartConfig {
  fn default() -> Self {
    let (width, height) = render::DEFAULT_CHART_SIZE;
    Self {
      width,
      height,
      bar_width: render::DEFAULT_BAR_WIDTH,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Where charts and reports are written
  pub output_dir: Option<PathBuf>,
  /// HTML template used instead of the built-in one
  pub html_template: Option<PathBuf>,
  /// Log level: error, warn, info, debug, trace
  pub log_level: String,
  /// Colored console output (still off when stderr is not a terminal)
  pub color: bool,
  pub chart: ChartConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      output_dir: None,
      html_template: None,
      log_level: "info".to_string(),
      color: true,
      chart: ChartConfig::default(),
    }
  }
}

/// A config together with where it came from.
#[derive(Debug)]
pub struct LoadedConfig {
  pub config: Config,
  /// File the config was read from, `None` for defaults
  pub source: Option<PathBuf>,
  /// Implicit config files that exist but could not be used
  pub skipped: Vec<(PathBuf, String)>,
}

impl Config {
  /// Load the config for `project_path`.
  ///
  /// An explicit path must be readable and valid. Implicit files that fail to
  /// load are skipped and reported in [`LoadedConfig::skipped`].
  pub fn load(explicit: Option<&Path>, project_path: &Path) -> anyhow::Result<LoadedConfig> {
    if let Some(path) = explicit {
      let config = Self::load_file(path)?;
      return Ok(LoadedConfig {
        config,
        source: Some(path.to_path_buf()),
        skipped: Vec::new(),
      });
    }

    let mut skipped = Vec::new();
    let candidates = [Some(Self::project_config_path(project_path)), Self::user_config_path()];

    for path in candidates.into_iter().flatten() {
      if !path.exists() {
        continue;
      }
      match Self::load_file(&path) {
        Ok(config) => {
          return Ok(LoadedConfig {
            config,
            source: Some(path),
            skipped,
          });
        }
        Err(e) => skipped.push((path, format!("{:#}", e))),
      }
    }

    Ok(LoadedConfig {
      config: Self::default(),
      source: None,
      skipped,
    })
  }

  fn load_file(path: &Path) -> anyhow::Result<Self> {
    let content =
      std::fs::read_to_string(path).with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
  }

  /// Get the project-relative config path
  pub fn project_config_path(project_path: &Path) -> PathBuf {
    project_path.join(PROJECT_CONFIG_FILE)
  }

  /// Get the user-level config path
  pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("BENCHVIZ_CONFIG_DIR") {
      return Some(PathBuf::from(path).join("config.toml"));
    }

    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
      return Some(PathBuf::from(path).join("benchviz").join("config.toml"));
    }

    dirs::config_dir().map(|p: PathBuf| p.join("benchviz").join("config.toml"))
  }
}
