// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed error kinds that callers branch on (configuration vs. tracker failures)
// role: errors/types
// outputs: ConfigError (operator remediation text) and TrackerError (transport, HTTP, decode, missing item)
// invariants: Display of ConfigError always names the git config key to set; TrackerError is never swallowed by the core
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

/// A required connection setting could not be found.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error(
    "I don't know your Jira API {thing}!\nPlease set it with:\n  $ git config {key} <{thing}>\nor export {env}=<{thing}>"
  )]
  MissingSetting {
    key: &'static str,
    env: &'static str,
    thing: &'static str,
  },

  #[error("invalid {what}: {value}")]
  Invalid { what: &'static str, value: String },
}

/// Failures raised by a tracker backend. The core propagates these unchanged.
#[derive(Debug, Error)]
pub enum TrackerError {
  #[error("tracker responded {status} for {url}: {body}")]
  Http { status: u16, url: String, body: String },

  #[error("tracker request to {url} failed: {message}")]
  Transport { url: String, message: String },

  #[error("could not decode tracker response from {source_name}: {message}")]
  Decode { source_name: String, message: String },

  #[error("work item {key} not found")]
  NotFound { key: String },
}
