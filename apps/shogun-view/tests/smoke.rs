use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::process::Command;
use test_support::sample_queue;

/// Binary with config and log dirs pointed into a scratch dir.
fn shogun_view(home: &tempfile::TempDir) -> Command {
  let mut cmd = Command::cargo_bin("shogun-view").expect("compile bin");
  cmd
    .env("XDG_CONFIG_HOME", home.path().join("config"))
    .env("XDG_DATA_HOME", home.path().join("data"))
    .env_remove("SHOGUN_VIEW_ROOT");
  cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
  serde_json::from_slice(&output.stdout).expect("json envelope")
}

#[test]
fn help_exits_successfully() {
  let home = tempfile::tempdir().unwrap();
  shogun_view(&home)
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn no_arguments_prints_help() {
  let home = tempfile::tempdir().unwrap();
  shogun_view(&home)
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage: shogun-view"));
}

#[test]
fn dashboard_prints_envelope() {
  let home = tempfile::tempdir().unwrap();
  let q = sample_queue();
  let output = shogun_view(&home)
    .arg("--root")
    .arg(q.path())
    .arg("dashboard")
    .assert()
    .success()
    .get_output()
    .clone();
  let v = stdout_json(&output);
  assert_eq!(v["error"], Value::Null);
  assert_eq!(v["data"]["done_count"], 2);
  assert!(v["meta"]["generated_at"].is_string());
}

#[test]
fn root_is_found_from_environment() {
  let home = tempfile::tempdir().unwrap();
  let q = sample_queue();
  let output = shogun_view(&home)
    .env("SHOGUN_VIEW_ROOT", q.path())
    .args(["--compact", "tasks"])
    .assert()
    .success()
    .get_output()
    .clone();
  let text = String::from_utf8_lossy(&output.stdout);
  assert_eq!(text.trim_end().lines().count(), 1, "stdout: {text}");
  assert_eq!(stdout_json(&output)["meta"]["total"], 3);
}

#[test]
fn root_is_found_from_working_directory() {
  let home = tempfile::tempdir().unwrap();
  let q = sample_queue();
  let output = shogun_view(&home)
    .current_dir(q.path().join("queue/tasks"))
    .args(["reports", "ashigaru2"])
    .assert()
    .success()
    .get_output()
    .clone();
  assert_eq!(stdout_json(&output)["meta"]["total"], 2);
}

#[test]
fn error_envelope_exits_with_one() {
  let home = tempfile::tempdir().unwrap();
  let q = sample_queue();
  let output = shogun_view(&home)
    .arg("--root")
    .arg(q.path())
    .args(["read", "../etc/passwd"])
    .assert()
    .code(1)
    .get_output()
    .clone();
  assert_eq!(stdout_json(&output)["error"]["code"], "PATH_NOT_ALLOWED");
}

#[test]
fn invalid_project_config_is_reported_on_stderr() {
  let home = tempfile::tempdir().unwrap();
  let q = sample_queue();
  q.write("config/shogun-view.toml", "latest_reports_limit = 0\n");
  shogun_view(&home)
    .arg("--root")
    .arg(q.path())
    .arg("dashboard")
    .assert()
    .failure()
    .stderr(predicate::str::contains("latest_reports_limit"));
}

#[test]
fn logs_go_to_configured_file() {
  let home = tempfile::tempdir().unwrap();
  let q = sample_queue();
  let log = home.path().join("view.jsonl");
  q.write(
    "config/shogun-view.toml",
    &format!("log_path = {:?}\nlog_level = \"info\"\n", log.display().to_string()),
  );
  shogun_view(&home)
    .arg("--root")
    .arg(q.path())
    .arg("dashboard")
    .assert()
    .success();
  let text = std::fs::read_to_string(&log).expect("log file");
  assert!(text.contains("logging_initialized"), "log: {text}");
}
