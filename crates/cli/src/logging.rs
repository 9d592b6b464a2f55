//! Logging setup for the CLI

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// How console logging should look. Built once, before the subscriber is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
  pub level: Level,
  pub color: bool,
}

impl LogConfig {
  /// `--debug` wins over the configured level; `--no-color` and a non-terminal
  /// stderr both turn colors off.
  pub fn new(debug: bool, no_color: bool, config: &Config) -> Self {
    let level = if debug {
      Level::DEBUG
    } else {
      parse_log_level(&config.log_level)
    };

    Self {
      level,
      color: config.color && !no_color && std::io::stderr().is_terminal(),
    }
  }
}

/// Parse log level from config string
pub fn parse_log_level(level: &str) -> Level {
  match level.to_lowercase().as_str() {
    "off" | "error" => Level::ERROR,
    "warn" => Level::WARN,
    "info" => Level::INFO,
    "debug" => Level::DEBUG,
    "trace" => Level::TRACE,
    _ => Level::INFO,
  }
}

/// Initialize console logging on stderr, so stdout only carries chart output.
pub fn init_logging(log: &LogConfig) {
  // RUST_LOG still overrides the default directive
  let env_filter = EnvFilter::builder()
    .with_default_directive(log.level.into())
    .from_env_lossy();

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_ansi(log.color)
    .with_writer(std::io::stderr)
    .init();
}
