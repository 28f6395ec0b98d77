// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Trait seam for the issue-tracker collaborator plus backend selection (Jira REST or JSON fixtures)
// role: tracker/namespace
// inputs: Connection settings; env JIRA_REPORT_FIXTURES for the offline backend
// outputs: Box<dyn Tracker>; SearchQuery with JQL rendering
// invariants:
// - Both operations return items with their change history expanded
// - Search windows are half-open [since, until) on calendar days
// errors: Backends return TrackerError; nothing here retries
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod fixture;
pub mod jira_http;

use chrono::{Days, NaiveDate};

use crate::config::JiraSettings;
use crate::errors::TrackerError;
use crate::model::{Issue, SearchPage};

pub const FIXTURES_ENV: &str = "JIRA_REPORT_FIXTURES";
pub const PAGE_SIZE: usize = 50;

pub trait Tracker {
  /// One work item, including its change history. Missing items are an error.
  fn issue_by_key(&self, key: &str) -> Result<Issue, TrackerError>;

  /// One page of items in `query`'s project updated inside its window.
  fn search_page(&self, query: &SearchQuery, start_at: usize) -> Result<SearchPage, TrackerError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
  pub project: String,
  pub since: NaiveDate,
  pub until: NaiveDate,
}

impl SearchQuery {
  /// Items updated within `[day, day + 1)`.
  pub fn for_day(project: &str, day: NaiveDate) -> Self {
    Self {
      project: project.to_string(),
      since: day,
      until: day.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX),
    }
  }

  pub fn jql(&self) -> String {
    format!(
      "project = \"{}\" AND updated >= \"{}\" AND updated < \"{}\" ORDER BY key ASC",
      self.project.replace('"', "\\\""),
      self.since.format("%Y-%m-%d"),
      self.until.format("%Y-%m-%d"),
    )
  }
}

/// Path of the offline fixture file, when one is configured.
pub fn fixtures_path() -> Option<String> {
  std::env::var(FIXTURES_ENV).ok().filter(|p| !p.trim().is_empty())
}

/// Select the backend: fixtures when configured, the Jira REST API otherwise.
pub fn build_tracker(settings: Option<&JiraSettings>) -> anyhow::Result<Box<dyn Tracker>> {
  if let Some(path) = fixtures_path() {
    return Ok(Box::new(fixture::FixtureTracker::from_path(&path)?));
  }

  match settings {
    Some(s) => Ok(Box::new(jira_http::JiraHttpApi::new(s))),
    None => anyhow::bail!("no tracker backend available: connection settings are missing"),
  }
}
