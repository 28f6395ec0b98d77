// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Jira REST v2 tracker backend over blocking ureq with basic auth and changelog expansion
// role: tracker/jira-http
// inputs: JiraSettings (user, password, site, read timeout)
// outputs: Issues and search pages decoded into the raw model
// side_effects: Network calls to <site>/rest/api/2/search
// invariants:
// - Every request sends expand=changelog and the configured read timeout
// - Non-2xx responses become TrackerError::Http with Jira's errorMessages when present
// errors: Surfaced to the caller; no retries
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use base64::Engine;
use tracing::debug;

use crate::config::JiraSettings;
use crate::errors::TrackerError;
use crate::ext::serde_json::JsonFetch;
use crate::model::{Issue, SearchPage};
use crate::tracker::{SearchQuery, Tracker, PAGE_SIZE};

pub struct JiraHttpApi {
  agent: ureq::Agent,
  search_url: String,
  authorization: String,
}

impl JiraHttpApi {
  pub fn new(settings: &JiraSettings) -> Self {
    let agent = ureq::AgentBuilder::new()
      .timeout_read(settings.read_timeout)
      .user_agent("jira-cycle-report")
      .build();

    Self {
      agent,
      search_url: search_url(&settings.site),
      authorization: basic_auth(&settings.user, &settings.password),
    }
  }

  fn search_jql(&self, jql: &str, start_at: usize, max_results: usize) -> Result<SearchPage, TrackerError> {
    debug!(jql, start_at, "jira search");

    let response = self
      .agent
      .get(&self.search_url)
      .set("Accept", "application/json")
      .set("Authorization", &self.authorization)
      .query("jql", jql)
      .query("expand", "changelog")
      .query("startAt", &start_at.to_string())
      .query("maxResults", &max_results.to_string())
      .call();

    match response {
      Ok(resp) => resp.into_json::<SearchPage>().map_err(|e| TrackerError::Decode {
        source_name: self.search_url.clone(),
        message: e.to_string(),
      }),
      Err(ureq::Error::Status(status, resp)) => {
        let body = resp.into_string().unwrap_or_default();
        Err(TrackerError::Http {
          status,
          url: self.search_url.clone(),
          body: error_summary(&body),
        })
      }
      Err(ureq::Error::Transport(t)) => Err(TrackerError::Transport {
        url: self.search_url.clone(),
        message: t.to_string(),
      }),
    }
  }
}

impl Tracker for JiraHttpApi {
  fn issue_by_key(&self, key: &str) -> Result<Issue, TrackerError> {
    let jql = format!("key = \"{}\"", key.replace('"', "\\\""));
    let page = self.search_jql(&jql, 0, 1)?;

    page
      .issues
      .into_iter()
      .next()
      .ok_or_else(|| TrackerError::NotFound { key: key.to_string() })
  }

  fn search_page(&self, query: &SearchQuery, start_at: usize) -> Result<SearchPage, TrackerError> {
    self.search_jql(&query.jql(), start_at, PAGE_SIZE)
  }
}

fn search_url(site: &str) -> String {
  format!("{}/rest/api/2/search", site.trim_end_matches('/'))
}

fn basic_auth(user: &str, password: &str) -> String {
  let token = base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", user, password));
  format!("Basic {}", token)
}

/// Prefer Jira's `errorMessages` list over the raw body.
fn error_summary(body: &str) -> String {
  let Ok(v) = serde_json::from_str::<serde_json::Value>(body) else {
    return body.trim().to_string();
  };

  let messages = v.fetch("errorMessages").to_or_default::<Vec<String>>();

  if messages.is_empty() {
    body.trim().to_string()
  } else {
    messages.join("; ")
  }
}
