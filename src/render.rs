// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: CSV rendering of report rows, written and flushed incrementally
// role: output/csv
// inputs: ReportRow values; any io::Write sink (file truncated at run start)
// outputs: Header row then one record per row; optional trailing Labels column
// side_effects: Creates/truncates the output file; flushes after every record
// invariants:
// - Header is exactly Project,Issue,User,Started At,Completed At,Week,Estimate,Duration[,Labels]
// - Every record has the same column count as the header
// errors: IO/CSV errors bubble with the output path as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Serialize, Serializer};

pub const HEADER: [&str; 8] = [
  "Project",
  "Issue",
  "User",
  "Started At",
  "Completed At",
  "Week",
  "Estimate",
  "Duration",
];
pub const LABELS_HEADER: &str = "Labels";

/// One output line for a closed, valid work item.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
  pub project: String,
  pub issue: String,
  pub user: String,
  pub started_at: String,
  pub completed_at: String,
  pub week: String,
  pub estimate: f64,
  /// Working time in whole seconds.
  pub duration_secs: i64,
  pub labels: Vec<String>,
}

/// Estimates always carry a fractional part (`5.0`, `1.6666666666666667`).
pub fn format_estimate(estimate: f64) -> String {
  format!("{:?}", estimate)
}

fn serialize_estimate<S: Serializer>(estimate: &f64, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(&format_estimate(*estimate))
}

/// Serialized shape of a row; `labels` is only present when the column is enabled.
#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
  #[serde(rename = "Project")]
  project: &'a str,
  #[serde(rename = "Issue")]
  issue: &'a str,
  #[serde(rename = "User")]
  user: &'a str,
  #[serde(rename = "Started At")]
  started_at: &'a str,
  #[serde(rename = "Completed At")]
  completed_at: &'a str,
  #[serde(rename = "Week")]
  week: &'a str,
  #[serde(rename = "Estimate", serialize_with = "serialize_estimate")]
  estimate: f64,
  #[serde(rename = "Duration")]
  duration: i64,
  #[serde(rename = "Labels", skip_serializing_if = "Option::is_none")]
  labels: Option<String>,
}

impl ReportRow {
  fn record(&self, include_labels: bool) -> CsvRecord<'_> {
    CsvRecord {
      project: &self.project,
      issue: &self.issue,
      user: &self.user,
      started_at: &self.started_at,
      completed_at: &self.completed_at,
      week: &self.week,
      estimate: self.estimate,
      duration: self.duration_secs,
      labels: include_labels.then(|| self.labels.join(",")),
    }
  }
}

pub struct CsvReport<W: Write> {
  writer: csv::Writer<W>,
  include_labels: bool,
}

impl CsvReport<File> {
  pub fn create(path: &Path, include_labels: bool) -> Result<Self> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Self::new(file, include_labels).with_context(|| format!("writing header to {}", path.display()))
  }
}

impl<W: Write> CsvReport<W> {
  pub fn new(sink: W, include_labels: bool) -> Result<Self> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(sink);

    let mut header: Vec<&str> = HEADER.to_vec();
    if include_labels {
      header.push(LABELS_HEADER);
    }
    writer.write_record(&header)?;
    writer.flush()?;

    Ok(Self { writer, include_labels })
  }

  pub fn write_row(&mut self, row: &ReportRow) -> Result<()> {
    self.writer.serialize(row.record(self.include_labels))?;
    self.writer.flush()?;
    Ok(())
  }

  #[cfg(test)]
  pub fn into_inner(self) -> Result<W> {
    self.writer.into_inner().map_err(|e| anyhow::anyhow!("flushing report: {}", e.error()))
  }
}
