// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Offline tracker backend serving work items from an in-memory list or a JSON fixture file
// role: tracker/fixture
// inputs: JSON file with {"issues": [...]} or a bare array; or Vec<Issue>
// outputs: Tracker implementation with a shared call log for assertions
// invariants:
// - search matches items whose key is "<PROJECT>-..." and whose fields.updated date falls in [since, until)
// - Results keep fixture order; pages honor the configured page size
// - issue_by_key returns NotFound for unknown keys
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};

use crate::errors::TrackerError;
use crate::model::{Issue, SearchPage};
use crate::tracker::{SearchQuery, Tracker, PAGE_SIZE};

pub type CallLog = Rc<RefCell<Vec<String>>>;

pub struct FixtureTracker {
  issues: Vec<Issue>,
  page_size: usize,
  calls: CallLog,
}

impl FixtureTracker {
  pub fn new(issues: Vec<Issue>) -> Self {
    Self {
      issues,
      page_size: PAGE_SIZE,
      calls: Rc::new(RefCell::new(Vec::new())),
    }
  }

  pub fn from_path(path: &str) -> Result<Self> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading tracker fixtures {}", path))?;
    let value: serde_json::Value =
      serde_json::from_str(&raw).with_context(|| format!("parsing tracker fixtures {}", path))?;

    let list = match value.get("issues") {
      Some(issues) => issues.clone(),
      None => value,
    };
    let issues: Vec<Issue> =
      serde_json::from_value(list).with_context(|| format!("decoding issues in {}", path))?;

    Ok(Self::new(issues))
  }

  #[cfg(test)]
  pub fn with_page_size(mut self, page_size: usize) -> Self {
    self.page_size = page_size.max(1);
    self
  }

  #[cfg(test)]
  /// Shared record of every call made, e.g. "issue P-1" or "search P 2016-01-04 0".
  pub fn call_log(&self) -> CallLog {
    Rc::clone(&self.calls)
  }

  fn in_window(issue: &Issue, query: &SearchQuery) -> bool {
    let prefix = format!("{}-", query.project.to_ascii_uppercase());

    if !issue.key.to_ascii_uppercase().starts_with(&prefix) {
      return false;
    }

    match issue.updated_at() {
      Some(at) => {
        let day = at.date_naive();
        day >= query.since && day < query.until
      }
      None => false,
    }
  }
}

impl Tracker for FixtureTracker {
  fn issue_by_key(&self, key: &str) -> Result<Issue, TrackerError> {
    self.calls.borrow_mut().push(format!("issue {}", key));

    self
      .issues
      .iter()
      .find(|i| i.key == key)
      .cloned()
      .ok_or_else(|| TrackerError::NotFound { key: key.to_string() })
  }

  fn search_page(&self, query: &SearchQuery, start_at: usize) -> Result<SearchPage, TrackerError> {
    self
      .calls
      .borrow_mut()
      .push(format!("search {} {} {}", query.project, query.since, start_at));

    let matching: Vec<&Issue> = self.issues.iter().filter(|i| Self::in_window(i, query)).collect();
    let issues = matching
      .iter()
      .skip(start_at)
      .take(self.page_size)
      .map(|i| (*i).clone())
      .collect();

    Ok(SearchPage {
      start_at,
      max_results: self.page_size,
      total: matching.len(),
      issues,
    })
  }
}
