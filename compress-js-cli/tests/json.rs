use assert_cmd::Command;
use serde_json::json;
use serde_json::Value;
use std::time::Duration;

fn compress_js_cli() -> Command {
  assert_cmd::cargo::cargo_bin_cmd!("compress-js-cli")
}

fn json_stdout(assert: &assert_cmd::assert::Assert) -> Value {
  let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
  serde_json::from_str(&stdout).expect("stdout to be valid JSON")
}

#[test]
fn json_success_contains_schema_version_output_and_renames() {
  let assert = compress_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--json")
    .write_stdin("function f(alpha) { return alpha }")
    .assert()
    .success()
    .code(0);

  assert!(
    assert.get_output().stderr.is_empty(),
    "expected stderr to be empty, got: {}",
    String::from_utf8_lossy(&assert.get_output().stderr)
  );

  let value = json_stdout(&assert);
  assert_eq!(value["schema_version"], 1);
  assert_eq!(value["output"], "function f(a){return a;}");
  assert_eq!(
    value["renames"],
    json!([{ "depth": 1, "original": "alpha", "assigned": "a" }])
  );
  assert_eq!(value["errors"], json!([]));
}

#[test]
fn json_nomunge_has_no_renames() {
  let assert = compress_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--json")
    .arg("--nomunge")
    .write_stdin("function f(alpha) { return alpha }")
    .assert()
    .success();

  let value = json_stdout(&assert);
  assert_eq!(value["output"], "function f(alpha){return alpha;}");
  assert_eq!(value["renames"], json!([]));
}

#[test]
fn json_error_contains_errors_array() {
  let assert = compress_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--json")
    .write_stdin("function {")
    .assert()
    .failure()
    .code(2);

  assert!(
    assert.get_output().stderr.is_empty(),
    "expected stderr to be empty, got: {}",
    String::from_utf8_lossy(&assert.get_output().stderr)
  );

  let value = json_stdout(&assert);
  assert_eq!(value["schema_version"], 1);
  assert_eq!(value["output"], "");
  let errors = value["errors"].as_array().expect("expected errors array");
  assert_eq!(errors.len(), 1);
  assert_eq!(errors[0]["file"], "<stdin>");
  assert_eq!(errors[0]["line"], 1);
  assert!(errors[0]["code"].as_str().unwrap().starts_with("PS"));
}
