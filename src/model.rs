// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the raw work-item model (Jira issue JSON with changelog) consumed by the derivation engine
// role: model/types
// outputs: Deserializable structs with Jira field names; search page envelope
// invariants: Raw items are immutable once fetched; unknown fields are kept in `extra` for configurable lookups
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};

use crate::ext::serde_json::JsonFetch;

/// Parse a Jira timestamp (`2016-01-05T10:00:00.000+0000`) or plain RFC3339.
pub fn parse_jira_time(s: &str) -> Option<DateTime<FixedOffset>> {
  DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z")
    .or_else(|_| DateTime::parse_from_rfc3339(s))
    .ok()
}

fn de_jira_time<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = String::deserialize(deserializer)?;
  parse_jira_time(&raw).ok_or_else(|| serde::de::Error::custom(format!("unparseable timestamp: {}", raw)))
}

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
  pub key: String,
  pub fields: IssueFields,
  #[serde(default)]
  pub changelog: Changelog,
}

impl Issue {
  /// Raw numeric estimate under `field`, a dotted path into `fields` (number or numeric string).
  pub fn raw_estimate(&self, field: &str) -> Option<f64> {
    self.fields.extra.fetch(field).to_number()
  }

  pub fn assignee_email(&self) -> Option<&str> {
    self.fields.assignee.as_ref().and_then(|a| a.email_address.as_deref())
  }

  pub fn parent_key(&self) -> Option<&str> {
    self.fields.parent.as_ref().map(|p| p.key.as_str())
  }

  pub fn subtask_keys(&self) -> impl Iterator<Item = &str> {
    self.fields.subtasks.iter().map(|s| s.key.as_str())
  }

  /// Last update time as reported by the tracker, used by the fixture backend.
  pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
    self.fields.extra.fetch("updated").to::<String>().as_deref().and_then(parse_jira_time)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueFields {
  #[serde(default)]
  pub assignee: Option<JiraUser>,
  #[serde(default)]
  pub parent: Option<IssueLink>,
  #[serde(default)]
  pub subtasks: Vec<IssueLink>,
  #[serde(default)]
  pub labels: Vec<String>,
  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JiraUser {
  #[serde(rename = "emailAddress", default)]
  pub email_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueLink {
  pub key: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Changelog {
  #[serde(default)]
  pub histories: Vec<History>,
}

/// One change event: when it happened and which fields moved.
#[derive(Debug, Clone, Deserialize)]
pub struct History {
  #[serde(deserialize_with = "de_jira_time")]
  pub created: DateTime<FixedOffset>,
  #[serde(default)]
  pub items: Vec<HistoryItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryItem {
  pub field: String,
  #[serde(rename = "toString", default)]
  pub to_string: Option<String>,
}

/// `/rest/api/2/search` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
  #[serde(rename = "startAt", default)]
  pub start_at: usize,
  #[serde(rename = "maxResults", default)]
  pub max_results: usize,
  #[serde(default)]
  pub total: usize,
  #[serde(default)]
  pub issues: Vec<Issue>,
}

impl SearchPage {
  /// Offset of the next page, or None when this page was the last one.
  pub fn next_start(&self) -> Option<usize> {
    let next = self.start_at + self.issues.len();
    if self.issues.is_empty() || next >= self.total {
      None
    } else {
      Some(next)
    }
  }
}
