//! Benchmark records and their validation at the JSON boundary.

use crate::{ReportError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Read;

/// One of the three measured results of a benchmark case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
  Sent,
  Received,
  Elapsed,
}

impl Metric {
  /// All metrics, in report order.
  pub fn all() -> &'static [Metric] {
    &[Metric::Sent, Metric::Received, Metric::Elapsed]
  }

  /// Field name in the `result` object.
  pub fn name(&self) -> &'static str {
    match self {
      Metric::Sent => "sent",
      Metric::Received => "received",
      Metric::Elapsed => "elapsed",
    }
  }

  /// Chart title, e.g. "Sent Statistics".
  pub fn title(&self) -> &'static str {
    match self {
      Metric::Sent => "Sent Statistics",
      Metric::Received => "Received Statistics",
      Metric::Elapsed => "Elapsed Statistics",
    }
  }

  /// Axis label including the unit.
  pub fn ylabel(&self) -> &'static str {
    match self {
      Metric::Sent => "Sent [B]",
      Metric::Received => "Received [B]",
      Metric::Elapsed => "Elapsed [s]",
    }
  }
}

impl std::fmt::Display for Metric {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}

impl std::str::FromStr for Metric {
  type Err = ReportError;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s {
      "sent" => Ok(Metric::Sent),
      "received" => Ok(Metric::Received),
      "elapsed" => Ok(Metric::Elapsed),
      other => Err(ReportError::UnknownMetric(other.to_string())),
    }
  }
}

/// A measured number, kept in the numeric kind it had in the input.
///
/// Integer inputs compare with integer arithmetic, so the kind matters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
  Int(i64),
  Float(f64),
}

impl MetricValue {
  pub fn is_zero(&self) -> bool {
    match *self {
      MetricValue::Int(v) => v == 0,
      MetricValue::Float(v) => v == 0.0,
    }
  }

  pub fn as_f64(&self) -> f64 {
    match *self {
      MetricValue::Int(v) => v as f64,
      MetricValue::Float(v) => v,
    }
  }
}

impl std::fmt::Display for MetricValue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match *self {
      MetricValue::Int(v) => write!(f, "{}", v),
      // Keep "2.0" distinguishable from the integer 2
      MetricValue::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{:.1}", v),
      MetricValue::Float(v) => write!(f, "{}", v),
    }
  }
}

/// Measured results of one benchmark case.
///
/// Fields stay optional here; a missing metric is only an error once a
/// series for that metric is requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Measurements {
  pub sent: Option<MetricValue>,
  pub received: Option<MetricValue>,
  pub elapsed: Option<MetricValue>,
}

impl Measurements {
  pub fn get(&self, metric: Metric) -> Option<MetricValue> {
    match metric {
      Metric::Sent => self.sent,
      Metric::Received => self.received,
      Metric::Elapsed => self.elapsed,
    }
  }
}

/// A validated benchmark case.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
  /// Test name
  pub test: String,
  /// Test variant (the JSON `type` field)
  pub kind: String,
  /// Configuration key/value pairs in document order
  pub configuration: Vec<(String, String)>,
  /// Measured results
  pub result: Measurements,
}

impl BenchmarkRecord {
  pub fn new(test: impl Into<String>, kind: impl Into<String>, result: Measurements) -> Self {
    Self {
      test: test.into(),
      kind: kind.into(),
      configuration: Vec::new(),
      result,
    }
  }

  pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.configuration.push((key.into(), value.into()));
    self
  }

  pub fn display_name(&self, escape: bool) -> String {
    display_name(self, escape)
  }
}

/// Label for a record: `"<test> (<type>)"`.
///
/// With `escape`, underscores become `\_` so chart label markup does not
/// treat them as subscripts.
pub fn display_name(record: &BenchmarkRecord, escape: bool) -> String {
  let name = format!("{} ({})", record.test, record.kind);
  if escape { name.replace('_', "\\_") } else { name }
}

/// Record shape as it appears in the input document.
#[derive(Debug, Deserialize)]
struct RawRecord {
  test: Option<Value>,
  #[serde(rename = "type")]
  kind: Option<Value>,
  #[serde(default)]
  configuration: Option<Map<String, Value>>,
  #[serde(default)]
  result: Option<Measurements>,
}

impl RawRecord {
  fn validate(self, index: usize) -> Result<BenchmarkRecord> {
    let test = required_text(index, "test", self.test)?;
    let kind = required_text(index, "type", self.kind)?;

    let configuration = self
      .configuration
      .unwrap_or_default()
      .into_iter()
      .map(|(k, v)| (k, config_text(v)))
      .collect();

    Ok(BenchmarkRecord {
      test,
      kind,
      configuration,
      result: self.result.unwrap_or_default(),
    })
  }
}

fn required_text(index: usize, field: &str, value: Option<Value>) -> Result<String> {
  match value {
    Some(Value::String(s)) => Ok(s),
    Some(other) => Err(ReportError::MalformedRecord {
      index,
      reason: format!("'{}' must be a string, got {}", field, other),
    }),
    None => Err(ReportError::MalformedRecord {
      index,
      reason: format!("missing '{}'", field),
    }),
  }
}

fn config_text(value: Value) -> String {
  match value {
    Value::String(s) => s,
    Value::Null => String::new(),
    other => other.to_string(),
  }
}

fn validate_all(raw: Vec<RawRecord>) -> Result<Vec<BenchmarkRecord>> {
  raw
    .into_iter()
    .enumerate()
    .map(|(index, r)| r.validate(index))
    .collect()
}

/// Parse and validate a JSON array of benchmark records.
pub fn parse_records(json: &str) -> Result<Vec<BenchmarkRecord>> {
  let raw: Vec<RawRecord> = serde_json::from_str(json)?;
  let records = validate_all(raw)?;
  tracing::debug!("Parsed {} benchmark records", records.len());
  Ok(records)
}

/// Same as [`parse_records`], reading the document from `reader`.
pub fn parse_records_from_reader<R: Read>(reader: R) -> Result<Vec<BenchmarkRecord>> {
  let raw: Vec<RawRecord> = serde_json::from_reader(reader)?;
  let records = validate_all(raw)?;
  tracing::debug!("Parsed {} benchmark records", records.len());
  Ok(records)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display_name() {
    let record = BenchmarkRecord::new("tls_send", "af_ktls", Measurements::default());

    assert_eq!(display_name(&record, false), "tls_send (af_ktls)");
    assert_eq!(display_name(&record, true), "tls\\_send (af\\_ktls)");
  }

  #[test]
  fn test_parse_records_keeps_order() {
    let json = r#"[
      {"test": "b", "type": "x", "result": {"sent": 1, "received": 2, "elapsed": 0.5}},
      {"test": "a", "type": "y", "result": {"sent": 3, "received": 4, "elapsed": 1.5}}
    ]"#;

    let records = parse_records(json).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].test, "b");
    assert_eq!(records[1].test, "a");
    assert_eq!(records[0].result.sent, Some(MetricValue::Int(1)));
    assert_eq!(records[1].result.elapsed, Some(MetricValue::Float(1.5)));
  }

  #[test]
  fn test_parse_configuration_order_and_scalars() {
    let json = r#"[
      {"test": "t", "type": "k",
       "configuration": {"zeta": "1", "alpha": 42, "tls": true, "empty": null},
       "result": {}}
    ]"#;

    let records = parse_records(json).unwrap();
    let keys: Vec<_> = records[0].configuration.iter().map(|(k, _)| k.as_str()).collect();

    assert_eq!(keys, vec!["zeta", "alpha", "tls", "empty"]);
    assert_eq!(records[0].configuration[1].1, "42");
    assert_eq!(records[0].configuration[2].1, "true");
    assert_eq!(records[0].configuration[3].1, "");
  }

  #[test]
  fn test_missing_type_is_malformed() {
    let json = r#"[{"test": "ok", "type": "x"}, {"test": "no-type"}]"#;

    let err = parse_records(json).unwrap_err();

    assert!(matches!(err, ReportError::MalformedRecord { index: 1, .. }));
  }

  #[test]
  fn test_non_string_test_is_malformed() {
    let err = parse_records(r#"[{"test": 7, "type": "x"}]"#).unwrap_err();
    assert!(matches!(err, ReportError::MalformedRecord { index: 0, .. }));
  }

  #[test]
  fn test_not_an_array() {
    let err = parse_records(r#"{"test": "a"}"#).unwrap_err();
    assert!(matches!(err, ReportError::Json(_)));
  }

  #[test]
  fn test_missing_result_is_allowed_at_parse_time() {
    let records = parse_records(r#"[{"test": "a", "type": "b"}]"#).unwrap();
    assert_eq!(records[0].result, Measurements::default());
    assert!(records[0].configuration.is_empty());
  }

  #[test]
  fn test_metric_from_str() {
    assert_eq!("sent".parse::<Metric>().unwrap(), Metric::Sent);
    assert_eq!("elapsed".parse::<Metric>().unwrap(), Metric::Elapsed);
    assert!(matches!(
      "latency".parse::<Metric>(),
      Err(ReportError::UnknownMetric(m)) if m == "latency"
    ));
  }

  #[test]
  fn test_metric_value_display() {
    assert_eq!(MetricValue::Int(200).to_string(), "200");
    assert_eq!(MetricValue::Float(2.0).to_string(), "2.0");
    assert_eq!(MetricValue::Float(0.25).to_string(), "0.25");
  }
}
