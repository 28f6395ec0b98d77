use anyhow::Result;
use chrono::NaiveDate;

use crate::cli::EffectiveConfig;
use crate::report::ReportParams;
use crate::util;
use crate::window;

pub fn build_report_params(cfg: &EffectiveConfig, holidays: Vec<NaiveDate>) -> Result<ReportParams> {
  let now = util::effective_now(window::parse_now_override(cfg.now_override.as_deref(), cfg.tz)?);

  Ok(ReportParams {
    projects: cfg.projects.clone(),
    since: cfg.since,
    now,
    tz: cfg.tz,
    labels: cfg.labels,
    out: cfg.out.clone(),
    holidays,
  })
}
