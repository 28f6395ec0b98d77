// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Story view over one raw work item exposing derived facts (start, close, assignee, estimate) and validity
// role: derivation/story
// inputs: Raw Issue; StoryRepo for parent/children lookups
// outputs: Derived facts as genuine Options; StoryFacts snapshot; ValidStory when all required facts are present
// invariants:
// - Facts are computed on demand; only the repository caches lookups
// - started_at prefers "In Progress" over "In Dev"; closed_at prefers "Closed" over "Done"
// - missing() lists exactly the absent required fields, in a fixed order
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod estimate;
pub mod history;

use chrono::{DateTime, FixedOffset};

use crate::errors::TrackerError;
use crate::model::Issue;
use crate::story_repo::StoryRepo;

pub const STARTED_STATUSES: [&str; 2] = ["In Progress", "In Dev"];
pub const CLOSED_STATUSES: [&str; 2] = ["Closed", "Done"];

#[derive(Debug)]
pub struct Story {
  issue: Issue,
  raw_estimate: Option<f64>,
}

impl Story {
  pub fn new(issue: Issue, estimate_field: &str) -> Self {
    let raw_estimate = issue.raw_estimate(estimate_field);
    Self { issue, raw_estimate }
  }

  pub fn key(&self) -> &str {
    &self.issue.key
  }

  pub fn started_at(&self) -> Option<DateTime<FixedOffset>> {
    history::first_status_timestamp(&self.issue.changelog.histories, &STARTED_STATUSES)
  }

  pub fn closed_at(&self) -> Option<DateTime<FixedOffset>> {
    history::first_status_timestamp(&self.issue.changelog.histories, &CLOSED_STATUSES)
  }

  pub fn is_closed(&self) -> bool {
    self.closed_at().is_some()
  }

  pub fn assignee(&self) -> Option<&str> {
    self.issue.assignee_email()
  }

  /// The item's own estimate field, before any inheritance.
  pub fn raw_estimate(&self) -> Option<f64> {
    self.raw_estimate
  }

  pub fn labels(&self) -> &[String] {
    &self.issue.fields.labels
  }

  pub fn parent_key(&self) -> Option<&str> {
    self.issue.parent_key()
  }

  pub fn child_keys(&self) -> impl Iterator<Item = &str> {
    self.issue.subtask_keys()
  }

  pub fn estimate(&self, repo: &StoryRepo) -> Result<Option<f64>, TrackerError> {
    estimate::resolve_estimate(self, repo)
  }

  /// Snapshot every derived fact; estimate resolution may fetch related items.
  pub fn facts(&self, repo: &StoryRepo) -> Result<StoryFacts, TrackerError> {
    Ok(StoryFacts {
      key: self.key().to_string(),
      started_at: self.started_at(),
      closed_at: self.closed_at(),
      assignee: self.assignee().map(str::to_string),
      estimate: self.estimate(repo)?,
      labels: self.labels().to_vec(),
    })
  }
}

/// Derived facts with explicit absence.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryFacts {
  pub key: String,
  pub started_at: Option<DateTime<FixedOffset>>,
  pub closed_at: Option<DateTime<FixedOffset>>,
  pub assignee: Option<String>,
  pub estimate: Option<f64>,
  pub labels: Vec<String>,
}

/// A story whose required facts are all present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidStory {
  pub key: String,
  pub started_at: DateTime<FixedOffset>,
  pub closed_at: DateTime<FixedOffset>,
  pub assignee: String,
  pub estimate: f64,
  pub labels: Vec<String>,
}

impl StoryFacts {
  /// Names of required facts that are absent. `ref` is always present.
  pub fn missing(&self) -> Vec<&'static str> {
    let checks = [
      ("ref", !self.key.is_empty()),
      ("started_at", self.started_at.is_some()),
      ("closed_at", self.closed_at.is_some()),
      ("assignee", self.assignee.is_some()),
      ("estimate", self.estimate.is_some()),
    ];

    checks.iter().filter(|(_, present)| !present).map(|(name, _)| *name).collect()
  }

  #[cfg(test)]
  pub fn is_valid(&self) -> bool {
    self.missing().is_empty()
  }

  /// Promote to a ValidStory, or return the missing field names.
  pub fn validate(self) -> Result<ValidStory, Vec<&'static str>> {
    match (self.started_at, self.closed_at, self.assignee, self.estimate) {
      (Some(started_at), Some(closed_at), Some(assignee), Some(estimate)) if !self.key.is_empty() => Ok(ValidStory {
        key: self.key,
        started_at,
        closed_at,
        assignee,
        estimate,
        labels: self.labels,
      }),
      (started_at, closed_at, assignee, estimate) => {
        let facts = StoryFacts { key: self.key, started_at, closed_at, assignee, estimate, labels: self.labels };
        Err(facts.missing())
      }
    }
  }
}
