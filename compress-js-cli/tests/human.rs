use assert_cmd::Command;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn compress_js_cli() -> Command {
  assert_cmd::cargo::cargo_bin_cmd!("compress-js-cli")
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
  String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

fn stderr_of(assert: &assert_cmd::assert::Assert) -> String {
  String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}

#[test]
fn compresses_stdin_to_stdout() {
  let assert = compress_js_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin("function test() { var longVariableName = 123; return longVariableName; }")
    .assert()
    .success()
    .code(0);

  assert_eq!(stdout_of(&assert), "function test(){var a=123;return a;}");
  assert!(
    assert.get_output().stderr.is_empty(),
    "expected stderr to be empty, got: {}",
    stderr_of(&assert)
  );
}

#[test]
fn nomunge_keeps_local_names() {
  let assert = compress_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--nomunge")
    .write_stdin("function test() { var longVariableName = 123; return longVariableName; }")
    .assert()
    .success();

  assert_eq!(
    stdout_of(&assert),
    "function test(){var longVariableName=123;return longVariableName;}"
  );
}

#[test]
fn line_break_wraps_output() {
  let assert = compress_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--line-break")
    .arg("8")
    .write_stdin("var x = 1;\nvar y = 2;")
    .assert()
    .success();

  assert_eq!(stdout_of(&assert), "var x=1;\nvar y=2;");
}

#[test]
fn hint_comments_need_preserve_flag() {
  let source = "/*@preserve x*/ /*! kept */ var a;";
  let plain = compress_js_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin(source)
    .assert()
    .success();
  assert_eq!(stdout_of(&plain), "/*! kept */\nvar a;");

  let preserved = compress_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("-p")
    .write_stdin(source)
    .assert()
    .success();
  assert_eq!(stdout_of(&preserved), "/*@preserve x*/\n/*! kept */\nvar a;");
}

#[test]
fn parse_errors_exit_with_two() {
  let assert = compress_js_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin("function {")
    .assert()
    .failure()
    .code(2);

  assert!(
    assert.get_output().stdout.is_empty(),
    "expected stdout to be empty, got: {}",
    stdout_of(&assert)
  );
  let stderr = stderr_of(&assert);
  assert!(stderr.starts_with("[ERROR] in <stdin>\n  1:"), "got: {}", stderr);
}

#[test]
fn writes_output_and_mapping_files() {
  let dir = tempdir().unwrap();
  let input = dir.path().join("input.js");
  let output = dir.path().join("output.js");
  let mapping = dir.path().join("mapping.txt");
  fs::write(
    &input,
    "function f() { var x = 1; function g() { var y = x; return y } return g }",
  )
  .unwrap();

  let assert = compress_js_cli()
    .timeout(Duration::from_secs(5))
    .arg(&input)
    .arg("-o")
    .arg(&output)
    .arg("-m")
    .arg(&mapping)
    .assert()
    .success();

  assert!(assert.get_output().stdout.is_empty());
  assert_eq!(
    fs::read_to_string(&output).unwrap(),
    "function f(){var a=1;function b(){var b=a;return b;}return b;}"
  );
  assert_eq!(
    fs::read_to_string(&mapping).unwrap(),
    format!(
      "\n\nFile: {}\n\nx -> a\ng -> b\n  y -> b\n",
      input.display()
    )
  );
}

#[test]
fn every_file_is_attempted_and_the_worst_exit_code_wins() {
  let dir = tempdir().unwrap();
  let good = dir.path().join("good.js");
  let bad = dir.path().join("bad.js");
  let missing = dir.path().join("missing.js");
  fs::write(&good, "var a = 1;").unwrap();
  fs::write(&bad, "var = ;").unwrap();

  let assert = compress_js_cli()
    .timeout(Duration::from_secs(5))
    .arg(&missing)
    .arg(&good)
    .assert()
    .failure()
    .code(1);
  assert_eq!(stdout_of(&assert), "var a=1;");
  assert!(stderr_of(&assert).contains("failed to read input"));

  let assert = compress_js_cli()
    .timeout(Duration::from_secs(5))
    .arg(&bad)
    .arg(&missing)
    .arg(&good)
    .assert()
    .failure()
    .code(2);
  assert_eq!(stdout_of(&assert), "var a=1;");
  let stderr = stderr_of(&assert);
  assert!(stderr.contains(&format!("[ERROR] in {}", bad.display())), "got: {}", stderr);
}

#[test]
fn usage_errors_exit_with_one() {
  compress_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--line-break")
    .arg("wide")
    .assert()
    .failure()
    .code(1);
}
