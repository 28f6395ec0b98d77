use predicates::prelude::*;
use serde_json::json;
use test_support::{isolated_report_cmd, tempdir, write_fixture_json};

fn closed_child(key: &str, updated: &str, parent: &str) -> serde_json::Value {
  json!({
    "key": key,
    "fields": {
      "updated": updated,
      "assignee": { "emailAddress": "dev@example.com" },
      "parent": { "key": parent }
    },
    "changelog": { "histories": [
      { "created": "2016-01-04T09:00:00.000+0000", "items": [{ "field": "status", "toString": "In Progress" }] },
      { "created": "2016-01-04T11:00:00.000+0000", "items": [{ "field": "status", "toString": "Closed" }] }
    ]}
  })
}

#[test]
fn unreachable_parent_aborts_but_keeps_flushed_rows() {
  let home = tempdir();
  let out = home.path().join("report.csv");

  let doc = json!({ "issues": [
    {
      "key": "WEB-1",
      "fields": { "updated": "2016-01-04T12:00:00.000+0000", "assignee": { "emailAddress": "dev@example.com" }, "customfield_10008": 2 },
      "changelog": { "histories": [
        { "created": "2016-01-04T09:00:00.000+0000", "items": [{ "field": "status", "toString": "In Progress" }] },
        { "created": "2016-01-04T11:00:00.000+0000", "items": [{ "field": "status", "toString": "Done" }] }
      ]}
    },
    closed_child("WEB-2", "2016-01-05T12:00:00.000+0000", "WEB-404")
  ]});
  let fixtures = write_fixture_json(home.path(), "issues.json", &doc);

  isolated_report_cmd(home.path())
    .env("JIRA_REPORT_FIXTURES", &fixtures)
    .args(["WEB", "--since", "2016-01-04", "--now-override", "2016-01-08T00:00:00Z", "--out"])
    .arg(&out)
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("Aborting"))
    .stderr(predicate::str::contains("WEB-404"));

  let csv = std::fs::read_to_string(&out).unwrap();
  assert_eq!(csv.lines().count(), 2);
  assert!(csv.contains("WEB,WEB-1,dev@example.com"));
}

#[test]
fn unreachable_site_aborts_the_run() {
  let home = tempdir();
  let out = home.path().join("report.csv");

  isolated_report_cmd(home.path())
    .env("JIRA_USER", "ops")
    .env("JIRA_PASSWORD", "secret")
    .env("JIRA_SITE", "http://127.0.0.1:9")
    .env("JIRA_READ_TIMEOUT", "5")
    .args(["WEB", "--since", "2016-01-04", "--now-override", "2016-01-05T00:00:00Z", "--out"])
    .arg(&out)
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("Aborting"));

  assert_eq!(
    std::fs::read_to_string(&out).unwrap(),
    "Project,Issue,User,Started At,Completed At,Week,Estimate,Duration\n"
  );
}

#[test]
fn malformed_fixture_file_is_an_error() {
  let home = tempdir();
  let fixtures = home.path().join("broken.json");
  std::fs::write(&fixtures, "{ not json").unwrap();

  isolated_report_cmd(home.path())
    .env("JIRA_REPORT_FIXTURES", &fixtures)
    .args(["WEB", "--now-override", "2016-01-05T00:00:00Z"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("parsing tracker fixtures"));
}
