use assert_cmd::Command;
use std::time::Duration;

fn compress_js_cli() -> Command {
  assert_cmd::cargo::cargo_bin_cmd!("compress-js-cli")
}

#[test]
fn rejects_invalid_utf8_input() {
  let assert = compress_js_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin(vec![0xFF])
    .assert()
    .failure()
    .code(1);

  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(
    stderr.contains("UTF-8"),
    "stderr should mention UTF-8 error, got: {}",
    stderr
  );
}

#[test]
fn non_ascii_text_passes_through() {
  let assert = compress_js_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin("var s = 'héllo, wörld';\nvar π = 3.14;")
    .assert()
    .success();

  assert_eq!(
    String::from_utf8_lossy(&assert.get_output().stdout),
    "var s='héllo, wörld';var π=3.14;"
  );
}
