// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for git subprocess calls, time formatting, effective "now", and man page rendering
// role: utilities/helpers
// inputs: Various primitives; DateTime; clap CommandFactory
// outputs: Command output, RFC3339 strings in a chosen zone, man page text
// side_effects: run_git invokes subprocesses
// invariants:
// - iso_in_tz emits seconds precision and uses Z for UTC
// - effective_now is the only place the wall clock is read
// errors: run_git surfaces command + stderr
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::process::Command;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use clap::CommandFactory;

pub fn run_git(repo: &str, args: &[String]) -> Result<String> {
  let out = Command::new("git")
    .args(args)
    .current_dir(repo)
    .output()
    .with_context(|| format!("spawning git {:?}", args))?;

  if out.status.success() {
    Ok(String::from_utf8_lossy(&out.stdout).to_string())
  } else {
    let stderr = String::from_utf8_lossy(&out.stderr);
    anyhow::bail!("git {:?} failed: {}", args, stderr)
  }
}

/// Formats an instant as RFC3339 in the given zone.
pub fn iso_in_tz<T: TimeZone>(at: &DateTime<T>, tz: Tz) -> String {
  at.with_timezone(&tz).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Returns the effective "now" given an optional override.
///
/// Keeps report runs reproducible without sprinkling `Utc::now()` through the code.
pub fn effective_now(override_now: Option<DateTime<Utc>>) -> DateTime<Utc> {
  override_now.unwrap_or_else(Utc::now)
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
