use anyhow::{bail, Result};
use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::Parser;
use std::path::PathBuf;

use crate::window::{self, DEFAULT_SINCE};

#[derive(Parser, Debug)]
#[command(
    name = "jira-cycle-report",
    version,
    about = "Export Jira work-item cycle times and estimates to CSV",
    long_about = None
)]
pub struct Cli {
  /// Jira project keys to scan, e.g. WEB API
  #[arg(value_name = "PROJECT", required_unless_present = "gen_man")]
  pub projects: Vec<String>,

  /// CSV file to write (created or truncated)
  #[arg(long, default_value = "report.csv")]
  pub out: PathBuf,

  /// First calendar day to scan (YYYY-MM-DD)
  #[arg(long, default_value = DEFAULT_SINCE)]
  pub since: String,

  /// Append a comma-joined Labels column
  #[arg(long)]
  pub labels: bool,

  /// IANA time zone for day windows, timestamps, weeks and working hours
  #[arg(long, default_value = "UTC")]
  pub tz: String,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EffectiveConfig {
  pub projects: Vec<String>,
  pub since: NaiveDate,
  pub tz: Tz,
  pub labels: bool,
  pub out: PathBuf,
  pub now_override: Option<String>,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let projects: Vec<String> = cli
    .projects
    .iter()
    .map(|p| p.trim().to_string())
    .filter(|p| !p.is_empty())
    .collect();

  if projects.is_empty() {
    bail!("Provide at least one project key");
  }

  let tz: Tz = match cli.tz.parse() {
    Ok(tz) => tz,
    Err(_) => bail!("Unknown time zone {:?}; use an IANA name such as UTC or Europe/Berlin", cli.tz),
  };

  let since = window::parse_day(&cli.since)?;

  Ok(EffectiveConfig {
    projects,
    since,
    tz,
    labels: cli.labels,
    out: cli.out,
    now_override: cli.now_override,
  })
}
