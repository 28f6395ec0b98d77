use serde_json::json;
use test_support::{fixture_path, isolated_report_cmd, read_fixture_json, tempdir, write_fixture_json};

#[test]
fn labels_flag_appends_joined_labels() {
  let home = tempdir();
  let out = home.path().join("labels.csv");

  isolated_report_cmd(home.path())
    .env("JIRA_REPORT_FIXTURES", fixture_path("issues.json"))
    .args(["WEB", "--labels", "--since", "2016-01-04", "--now-override", "2016-01-08T00:00:00Z", "--out"])
    .arg(&out)
    .assert()
    .success();

  let csv = std::fs::read_to_string(&out).unwrap();
  let lines: Vec<&str> = csv.lines().collect();
  assert_eq!(lines[0], "Project,Issue,User,Started At,Completed At,Week,Estimate,Duration,Labels");
  assert!(lines[1].ends_with(",28800,backend"));
  assert!(lines[2].ends_with(",36000,"));
  assert!(lines[3].ends_with(",12600,\"frontend,ui\""));
}

#[test]
fn configured_estimate_field_is_used() {
  let home = tempdir();
  let out = home.path().join("report.csv");

  // Move every estimate to a different custom field
  let mut doc: serde_json::Value = read_fixture_json("issues.json");
  for issue in doc["issues"].as_array_mut().unwrap() {
    let fields = issue["fields"].as_object_mut().unwrap();
    if let Some(v) = fields.remove("customfield_10008") {
      fields.insert("customfield_20000".into(), json!({ "value": v }));
    }
  }
  let fixtures = write_fixture_json(home.path(), "moved.json", &doc);

  isolated_report_cmd(home.path())
    .env("JIRA_REPORT_FIXTURES", &fixtures)
    .env("JIRA_ESTIMATE_FIELD", "customfield_20000.value")
    .args(["WEB", "--since", "2016-01-04", "--now-override", "2016-01-08T00:00:00Z", "--out"])
    .arg(&out)
    .assert()
    .success();

  let csv = std::fs::read_to_string(&out).unwrap();
  let estimates: Vec<&str> = csv.lines().skip(1).map(|l| l.split(',').nth(6).unwrap()).collect();
  assert_eq!(estimates, vec!["3.0", "5.0", "5.0"]);
}
