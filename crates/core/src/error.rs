use thiserror::Error;

/// Errors raised while reducing benchmark records.
#[derive(Debug, Error)]
pub enum ReportError {
  #[error("Malformed record #{index}: {reason}")]
  MalformedRecord { index: usize, reason: String },

  #[error("Record #{index} has no '{field}' result")]
  MissingField { index: usize, field: &'static str },

  #[error("Unknown metric: {0} (expected sent, received or elapsed)")]
  UnknownMetric(String),

  #[error("No benchmark records to report on")]
  NoRecords,

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
