// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Resolve Jira connection settings from the environment, then from `git config`
// role: configuration/lookup
// inputs: env JIRA_USER/JIRA_PASSWORD/JIRA_SITE/JIRA_ESTIMATE_FIELD/JIRA_READ_TIMEOUT/JIRA_HOLIDAYS; git config jira.*
// outputs: JiraSettings; holiday dates for the working-hours calendar
// side_effects: Spawns `git config --get` for keys not present in the environment
// invariants:
// - Missing user/password/site is detected before any tracker call
// - Environment wins over git config; blank values count as missing
// errors: ConfigError carrying remediation text
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::time::Duration;

use chrono::NaiveDate;

use crate::errors::ConfigError;
use crate::util::run_git;

pub const DEFAULT_ESTIMATE_FIELD: &str = "customfield_10008";
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 120;

/// One configurable value: its git config key, env override, and operator-facing name.
#[derive(Debug, Clone, Copy)]
pub struct Setting {
  pub key: &'static str,
  pub env: &'static str,
  pub thing: &'static str,
}

pub const USER: Setting = Setting { key: "jira.user", env: "JIRA_USER", thing: "username" };
pub const PASSWORD: Setting = Setting { key: "jira.password", env: "JIRA_PASSWORD", thing: "password" };
pub const SITE: Setting = Setting { key: "jira.site", env: "JIRA_SITE", thing: "url" };
pub const ESTIMATE_FIELD: Setting = Setting { key: "jira.estimateField", env: "JIRA_ESTIMATE_FIELD", thing: "estimate field" };
pub const READ_TIMEOUT: Setting = Setting { key: "jira.readTimeout", env: "JIRA_READ_TIMEOUT", thing: "read timeout (seconds)" };
pub const HOLIDAYS: Setting = Setting { key: "jira.holidays", env: "JIRA_HOLIDAYS", thing: "holidays (YYYY-MM-DD, comma separated)" };

#[derive(Debug, Clone)]
pub struct JiraSettings {
  pub user: String,
  pub password: String,
  pub site: String,
  pub estimate_field: String,
  pub read_timeout: Duration,
}

/// Environment first, then `git config --get`.
pub fn lookup(setting: &Setting) -> Option<String> {
  if let Ok(v) = std::env::var(setting.env) {
    if !v.trim().is_empty() {
      return Some(v.trim().to_string());
    }
  }

  let args: Vec<String> = vec!["config".into(), "--get".into(), setting.key.into()];

  run_git(".", &args)
    .ok()
    .map(|out| out.trim().to_string())
    .filter(|v| !v.is_empty())
}

pub fn load_settings() -> Result<JiraSettings, ConfigError> {
  load_with(lookup)
}

/// Estimate field for runs that need no credentials (fixture backend).
pub fn estimate_field() -> String {
  lookup(&ESTIMATE_FIELD).unwrap_or_else(|| DEFAULT_ESTIMATE_FIELD.to_string())
}

/// Non-working dates for the duration calendar; none when unset.
pub fn holidays() -> Result<Vec<NaiveDate>, ConfigError> {
  lookup(&HOLIDAYS).map_or(Ok(Vec::new()), |raw| parse_holidays(&raw))
}

pub fn parse_holidays(raw: &str) -> Result<Vec<NaiveDate>, ConfigError> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|d| !d.is_empty())
    .map(|d| {
      NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| ConfigError::Invalid {
        what: HOLIDAYS.key,
        value: d.to_string(),
      })
    })
    .collect()
}

pub fn load_with<F>(lookup: F) -> Result<JiraSettings, ConfigError>
where
  F: Fn(&Setting) -> Option<String>,
{
  let require = |s: &Setting| {
    lookup(s).ok_or(ConfigError::MissingSetting {
      key: s.key,
      env: s.env,
      thing: s.thing,
    })
  };

  let user = require(&USER)?;
  let password = require(&PASSWORD)?;
  let site = require(&SITE)?;

  let estimate_field = lookup(&ESTIMATE_FIELD).unwrap_or_else(|| DEFAULT_ESTIMATE_FIELD.to_string());

  let read_timeout = match lookup(&READ_TIMEOUT) {
    Some(raw) => {
      let secs = raw.parse::<u64>().map_err(|_| ConfigError::Invalid {
        what: READ_TIMEOUT.key,
        value: raw.clone(),
      })?;
      Duration::from_secs(secs)
    }
    None => Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
  };

  Ok(JiraSettings {
    user,
    password,
    site,
    estimate_field,
    read_timeout,
  })
}
