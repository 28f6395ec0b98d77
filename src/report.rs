// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Drive the scan (projects x days), filter to closed+valid stories, and emit one CSV row per story
// role: processing/orchestrator
// inputs: ReportParams (projects, since, now, tz, labels flag, output path); StoryRepo
// outputs: CSV rows flushed as they are produced; RunSummary of rows written and invalid items skipped
// side_effects: Tracker calls through the repository; writes the output file; logs progress
// invariants:
// - Row order is projects outer, days inner, items in tracker order within a day
// - Days run from `since` up to but excluding today in the report zone
// - Open items are skipped silently; closed but invalid items are skipped with a warning naming missing fields
// errors: Tracker and IO failures abort the run; rows already written stay on disk
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{info, warn};

use crate::render::{format_estimate, CsvReport, ReportRow};
use crate::story::ValidStory;
use crate::story_repo::StoryRepo;
use crate::tracker::SearchQuery;
use crate::util;
use crate::window;
use crate::working_hours::WorkingHours;

#[derive(Debug, Clone)]
pub struct ReportParams {
  pub projects: Vec<String>,
  pub since: NaiveDate,
  pub now: DateTime<Utc>,
  pub tz: Tz,
  pub labels: bool,
  pub out: PathBuf,
  pub holidays: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
  pub rows: usize,
  pub invalid: usize,
}

pub fn run(params: &ReportParams, repo: &StoryRepo) -> Result<RunSummary> {
  let mut report = CsvReport::create(&params.out, params.labels)?;
  let summary = scan(params, repo, &mut report)?;

  info!(rows = summary.rows, invalid = summary.invalid, out = %params.out.display(), "report written");
  Ok(summary)
}

/// Scan every project/day window and write rows into `report`.
pub fn scan<W: Write>(params: &ReportParams, repo: &StoryRepo, report: &mut CsvReport<W>) -> Result<RunSummary> {
  let calendar = WorkingHours::new(params.tz).with_holidays(params.holidays.iter().copied());
  let until = window::today(params.now, params.tz);
  let mut summary = RunSummary::default();

  for project in &params.projects {
    for day in window::days(params.since, until) {
      info!("{} {}", project, day);

      for story in repo.search(SearchQuery::for_day(project, day)) {
        let story = story.with_context(|| format!("searching {} on {}", project, day))?;

        if !story.is_closed() {
          continue;
        }

        let facts = story
          .facts(repo)
          .with_context(|| format!("resolving {}", story.key()))?;

        match facts.validate() {
          Ok(valid) => {
            info!("{} valid: {} points", valid.key, format_estimate(valid.estimate));
            report.write_row(&build_row(project, &valid, params.tz, &calendar))?;
            summary.rows += 1;
          }
          Err(missing) => {
            warn!("{} invalid: {:?}", story.key(), missing);
            summary.invalid += 1;
          }
        }
      }
    }
  }

  Ok(summary)
}

pub fn build_row(project: &str, story: &ValidStory, tz: Tz, calendar: &WorkingHours) -> ReportRow {
  let closed_local = story.closed_at.with_timezone(&tz);

  ReportRow {
    project: project.to_string(),
    issue: story.key.clone(),
    user: story.assignee.clone(),
    started_at: util::iso_in_tz(&story.started_at, tz),
    completed_at: util::iso_in_tz(&story.closed_at, tz),
    week: window::week_start(&closed_local).format("%Y-%m-%d").to_string(),
    estimate: story.estimate,
    duration_secs: calendar.business_duration(&story.started_at, &story.closed_at).num_seconds(),
    labels: story.labels.clone(),
  }
}
