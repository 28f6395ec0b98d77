use predicates::prelude::*;
use test_support::{fixture_path, isolated_report_cmd, tempdir};

const HEADER: &str = "Project,Issue,User,Started At,Completed At,Week,Estimate,Duration";

fn run_report(projects: &[&str], extra: &[&str]) -> (String, String) {
  let home = tempdir();
  let out = home.path().join("report.csv");

  let assert = isolated_report_cmd(home.path())
    .env("JIRA_REPORT_FIXTURES", fixture_path("issues.json"))
    .args(projects)
    .args(["--since", "2016-01-04", "--now-override", "2016-01-08T00:00:00Z", "--out"])
    .arg(&out)
    .args(extra)
    .assert()
    .success();

  let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
  (std::fs::read_to_string(&out).unwrap(), stderr)
}

#[test]
fn closed_valid_items_become_rows() {
  let (csv, _) = run_report(&["WEB"], &[]);

  let expected = [
    HEADER,
    "WEB,WEB-1,alice@example.com,2016-01-04T10:00:00Z,2016-01-05T10:00:00Z,2016-01-04,3.0,28800",
    "WEB,WEB-11,bob@example.com,2016-01-06T09:00:00Z,2016-01-07T11:00:00Z,2016-01-04,5.0,36000",
    "WEB,WEB-12,bob@example.com,2016-01-07T09:00:00Z,2016-01-07T12:30:00Z,2016-01-04,5.0,12600",
  ];
  assert_eq!(csv.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn invalid_items_are_warned_and_skipped() {
  let (csv, stderr) = run_report(&["WEB"], &[]);

  assert!(!csv.contains("WEB-3"));
  assert!(stderr.contains("WEB-3 invalid: [\"assignee\"]"), "stderr was: {}", stderr);
  // open items are skipped without a warning
  assert!(!csv.contains("WEB-2"));
  assert!(!stderr.contains("WEB-2"));
}

#[test]
fn progress_is_logged_per_project_day() {
  let (_, stderr) = run_report(&["WEB"], &[]);

  for day in ["2016-01-04", "2016-01-05", "2016-01-06", "2016-01-07"] {
    assert!(stderr.contains(&format!("WEB {}", day)), "missing day {} in: {}", day, stderr);
  }
  assert!(!stderr.contains("WEB 2016-01-08"));
  assert!(stderr.contains("WEB-1 valid: 3.0 points"));
}

#[test]
fn projects_are_scanned_in_argument_order() {
  let (csv, _) = run_report(&["API", "WEB"], &[]);

  let keys: Vec<&str> = csv.lines().skip(1).map(|l| l.split(',').nth(1).unwrap()).collect();
  assert_eq!(keys, vec!["API-1", "WEB-1", "WEB-11", "WEB-12"]);
  assert!(csv.contains("API,API-1,dave@example.com,2016-01-04T09:00:00Z,2016-01-05T09:00:00Z,2016-01-04,8.0,28800"));
}

#[test]
fn empty_range_writes_only_header() {
  let home = tempdir();
  let out = home.path().join("report.csv");
  std::fs::write(&out, "stale\n").unwrap();

  isolated_report_cmd(home.path())
    .env("JIRA_REPORT_FIXTURES", fixture_path("issues.json"))
    .args(["WEB", "--since", "2016-01-08", "--now-override", "2016-01-08T00:00:00Z", "--out"])
    .arg(&out)
    .assert()
    .success()
    .stderr(predicate::str::contains("WEB 2016-01-08").not());

  assert_eq!(std::fs::read_to_string(&out).unwrap(), format!("{}\n", HEADER));
}

#[test]
fn report_zone_shifts_timestamps() {
  let (csv, _) = run_report(&["WEB"], &["--tz", "Europe/Berlin"]);

  assert!(csv.contains("WEB,WEB-1,alice@example.com,2016-01-04T11:00:00+01:00,2016-01-05T11:00:00+01:00,2016-01-04,3.0,"));
}

#[test]
fn configured_holidays_are_not_working_time() {
  let home = tempdir();
  let out = home.path().join("report.csv");

  isolated_report_cmd(home.path())
    .env("JIRA_REPORT_FIXTURES", fixture_path("issues.json"))
    .env("JIRA_HOLIDAYS", "2016-01-05")
    .args(["WEB", "--since", "2016-01-04", "--now-override", "2016-01-08T00:00:00Z", "--out"])
    .arg(&out)
    .assert()
    .success();

  let csv = std::fs::read_to_string(&out).unwrap();
  assert!(csv.contains("WEB,WEB-1,alice@example.com,2016-01-04T10:00:00Z,2016-01-05T10:00:00Z,2016-01-04,3.0,25200"));
}

#[test]
fn malformed_holidays_abort_before_writing() {
  let home = tempdir();
  let out = home.path().join("report.csv");

  isolated_report_cmd(home.path())
    .env("JIRA_REPORT_FIXTURES", fixture_path("issues.json"))
    .env("JIRA_HOLIDAYS", "someday")
    .args(["WEB", "--now-override", "2016-01-08T00:00:00Z", "--out"])
    .arg(&out)
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("invalid jira.holidays: someday"));

  assert!(!out.exists());
}
