//! CLI smoke tests for the cfglint binary.

use std::fs;

use assert_cmd::Command;
use indoc::indoc;
use tempfile::TempDir;

const FIXTURE: &str = indoc! {r#"
    [
      {
        "descriptor": {
          "class_name": "com.example.Demo",
          "method_name": "spin",
          "signature": "()V"
        },
        "entry": 0,
        "blocks": [{ "id": 0 }, { "id": 1 }],
        "edges": [
          { "from": 0, "to": 1, "kind": "normal" },
          { "from": 1, "to": 0, "kind": "normal" }
        ]
      },
      {
        "descriptor": {
          "class_name": "com.example.Demo",
          "method_name": "wobble",
          "signature": "()D"
        },
        "entry": 0,
        "blocks": [
          {
            "id": 0,
            "instructions": [
              [0, { "op": "invoke", "dispatch": "static",
                    "owner": "java.lang.Math", "method": "random",
                    "signature": "()D" }],
              [3, { "op": "invoke", "dispatch": "static",
                    "owner": "java.lang.Math", "method": "sin",
                    "signature": "(D)D" }]
            ]
          }
        ]
      },
      {
        "descriptor": {
          "class_name": "com.example.Demo",
          "method_name": "native0",
          "signature": "()V"
        },
        "error": "native method"
      }
    ]
"#};

fn write_fixture(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("methods.json");
    fs::write(&path, FIXTURE).unwrap();
    path
}

#[test]
fn analyze_reports_findings_as_json() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);

    let assert = Command::cargo_bin("cfglint")
        .unwrap()
        .arg("analyze")
        .arg(&path)
        .args(["--format", "json"])
        .current_dir(dir.path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let findings: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let codes: Vec<&str> = findings
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["CFG_CYCLE", "CFG_RAND_BEFORE_SIN"]);
    assert_eq!(findings[0]["method"]["method_name"], "spin");
    assert_eq!(findings[1]["method"]["method_name"], "wobble");
}

#[test]
fn analyze_terminal_output_includes_a_summary() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);

    let assert = Command::cargo_bin("cfglint")
        .unwrap()
        .arg("analyze")
        .arg(&path)
        .current_dir(dir.path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("CFG_CYCLE"));
    assert!(stdout.contains("com.example.Demo.spin()V"));
    assert!(stdout.contains("2 methods analyzed, 1 skipped, 2 findings"));
}

#[test]
fn analyze_respects_a_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);
    let config = dir.path().join("cfglint.toml");
    fs::write(&config, "[detectors]\ncycle = false\n").unwrap();

    let assert = Command::cargo_bin("cfglint")
        .unwrap()
        .arg("analyze")
        .arg(&path)
        .args(["--format", "json"])
        .arg("--config")
        .arg(&config)
        .current_dir(dir.path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let findings: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let codes: Vec<&str> = findings
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["CFG_RAND_BEFORE_SIN"]);
}

#[test]
fn dump_prints_blocks_and_neighbors() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);

    let assert = Command::cargo_bin("cfglint")
        .unwrap()
        .arg("dump")
        .arg(&path)
        .current_dir(dir.path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("-------------------------------- com.example.Demo.spin()V"));
    assert!(stdout.contains("entry block"));
    assert!(stdout.contains("block 0:"));
    assert!(stdout.contains("invokestatic java.lang.Math.random()D"));
    assert!(stdout.contains("predecessors: 1"));
    assert!(stdout.contains("successors: 1"));
}

#[test]
fn missing_fixture_is_a_clean_error() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("cfglint")
        .unwrap()
        .arg("analyze")
        .arg(dir.path().join("absent.json"))
        .current_dir(dir.path())
        .assert()
        .failure();
}
