use assert_cmd::Command;
use serde_json::Value;
use std::time::Duration;
use tempfile::tempdir;

const FIXTURE: &str = r#"__all__ = ["PublicClass", "public_function"]

import os, sys
from math import sqrt
from collections import deque, defaultdict


def public_function(value):
    return value + 1


async def async_function():
    return 1


class PublicClass:
    def method(self):
        return "ok"


class _PrivateClass:
    pass
"#;

fn symbol_py_cli() -> Command {
  let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("symbol-py-cli");
  cmd.timeout(Duration::from_secs(5));
  cmd
}

fn parse_stdout_json(stdout: &[u8]) -> Value {
  serde_json::from_slice(stdout).expect("stdout should be valid JSON")
}

#[test]
fn enumerates_file_argument() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("fixture.py");
  std::fs::write(&path, FIXTURE).unwrap();

  let assert = symbol_py_cli().arg(&path).assert().success();
  let output = parse_stdout_json(&assert.get_output().stdout);
  assert_eq!(output["schema_version"], 1);
  assert_eq!(output["exports"], serde_json::json!(["PublicClass", "public_function"]));

  let decls = output["declarations"].as_array().unwrap();
  let summary: Vec<(&str, &str, &str)> = decls
    .iter()
    .map(|d| {
      (
        d["name"].as_str().unwrap(),
        d["kind"].as_str().unwrap(),
        d["visibility"].as_str().unwrap(),
      )
    })
    .collect();
  assert_eq!(summary, vec![
    ("public_function", "function", "public"),
    ("async_function", "async-function", "public"),
    ("PublicClass", "class", "public"),
    ("_PrivateClass", "class", "private"),
  ]);
  assert_eq!(decls[2]["members"][0]["name"], "method");
  assert_eq!(output["imports"].as_array().unwrap().len(), 5);
  assert_eq!(output["imports"][2]["module"], "math");
  assert_eq!(output["imports"][2]["name"], "sqrt");
}

#[test]
fn reads_stdin_and_applies_explicit_exports() {
  let assert = symbol_py_cli()
    .arg("--exports")
    .arg("_hidden,shown")
    .write_stdin("__all__ = ['other']\ndef _hidden(): pass\ndef shown(): pass\ndef other(): pass\n")
    .assert()
    .success();
  let output = parse_stdout_json(&assert.get_output().stdout);
  assert_eq!(output["exports"], serde_json::json!(["_hidden", "shown"]));
  let decls = output["declarations"].as_array().unwrap();
  assert_eq!(decls[0]["visibility"], "public");
  assert_eq!(decls[0]["exported"], true);
  assert_eq!(decls[2]["exported"], false);
}

#[test]
fn prints_ast() {
  let assert = symbol_py_cli()
    .arg("--ast")
    .write_stdin("def f(): pass\n")
    .assert()
    .success();
  let output = parse_stdout_json(&assert.get_output().stdout);
  assert_eq!(output["schema_version"], 1);
  assert_eq!(output["ast"]["body"][0]["$t"], "FuncDef");
  assert_eq!(output["ast"]["body"][0]["name"]["name"], "f");
}

#[test]
fn pretty_output_is_indented() {
  let assert = symbol_py_cli()
    .arg("--pretty")
    .write_stdin("class A: pass\n")
    .assert()
    .success();
  let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
  assert!(stdout.contains("\n  \"declarations\": ["), "got: {stdout}");
  parse_stdout_json(stdout.as_bytes());
}

#[test]
fn prints_diagnostic_on_parse_error() {
  let assert = symbol_py_cli()
    .write_stdin("def f(:\n  pass\n")
    .assert()
    .failure()
    .code(1);
  assert!(assert.get_output().stdout.is_empty());
  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(stderr.contains("error[PY"), "got: {stderr}");
  assert!(stderr.contains("<stdin>:1:"), "got: {stderr}");
  assert!(stderr.contains('^'), "got: {stderr}");
}

#[test]
fn json_errors_emit_diagnostics_on_stdout() {
  let assert = symbol_py_cli()
    .arg("--json-errors")
    .write_stdin("x = 1\ny = 'unterminated\n")
    .assert()
    .failure()
    .code(1);
  assert!(
    assert.get_output().stderr.is_empty(),
    "expected stderr to be empty in --json-errors mode, got: {}",
    String::from_utf8_lossy(&assert.get_output().stderr)
  );
  let output = parse_stdout_json(&assert.get_output().stdout);
  assert_eq!(output["schema_version"], 1);
  let diagnostic = &output["diagnostics"][0];
  assert_eq!(diagnostic["code"], "PY0008");
  assert_eq!(diagnostic["line"], 2);
  assert_eq!(diagnostic["start"], 10);
  assert!(diagnostic["message"].as_str().unwrap().contains("unterminated"));
}

#[test]
fn rejects_invalid_utf8() {
  let assert = symbol_py_cli()
    .write_stdin(vec![b'x', 0xFF])
    .assert()
    .failure()
    .code(2);
  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(stderr.contains("UTF-8"), "stderr should mention UTF-8, got: {stderr}");
}

#[test]
fn missing_file_is_host_error() {
  let dir = tempdir().unwrap();
  let assert = symbol_py_cli()
    .arg(dir.path().join("missing.py"))
    .assert()
    .failure()
    .code(2);
  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(stderr.contains("failed to open"), "got: {stderr}");
}

#[test]
fn verbose_logs_go_to_stderr() {
  let assert = symbol_py_cli()
    .arg("-v")
    .env_remove("RUST_LOG")
    .write_stdin("def f(): pass\n")
    .assert()
    .success();
  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(stderr.contains("enumerated module"), "got: {stderr}");
  parse_stdout_json(&assert.get_output().stdout);
}
