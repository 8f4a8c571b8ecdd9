//! CLI integration tests for the `codescape` binary.
//!
//! Uses `assert_cmd` to spawn the binary and verify exit codes, stdout
//! and stderr. Scripts, masks and configs are written to a fresh
//! `TempDir` per test.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn codescape() -> Command {
    let mut cmd = cargo_bin_cmd!("codescape");
    cmd.env_remove("CODESCAPE_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    codescape()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CodeScape city script runner"));
}

#[test]
fn version_exits_0() {
    codescape()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("codescape"));
}

// ──────────────────────────────────────────────
// 2. run
// ──────────────────────────────────────────────

#[test]
fn run_reports_each_call() {
    let dir = TempDir::new().unwrap();
    let script = write(
        &dir,
        "city.py",
        "build_house(5, 5, 2, 'Home')\nbuild_house(5, 5, 1, 'Dup')\n",
    );
    codescape()
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("line 1: ok: house at (5, 5)"))
        .stdout(predicate::str::contains("line 2: ok: house at (4, 4)"))
        .stdout(predicate::str::contains("2 of 2 call(s) succeeded, 0 diagnostic(s)"));
}

#[test]
fn run_keeps_going_past_bad_lines() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "city.py", "foo(1, 2)\nbuild_park(1, 1)\n");
    codescape()
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("warning: line 1: unknown operation \"foo\""))
        .stdout(predicate::str::contains("line 2: ok: park at (1, 1)"));
}

#[test]
fn run_strict_fails_on_diagnostics() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "city.py", "foo(1, 2)\nbuild_park(1, 1)\n");
    codescape()
        .args(["run", "--strict"])
        .arg(&script)
        .assert()
        .failure()
        .code(1);
}

#[test]
fn run_json_output() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "city.py", "clear_all()\nfoo(1,2)\n");
    let out = codescape()
        .args(["--output", "json", "run"])
        .arg(&script)
        .output()
        .unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["success_count"], 1);
    assert_eq!(json["results"][0]["value"]["removed"], 0);
    assert_eq!(json["diagnostics"][0]["kind"], "unknown_operation");
    assert_eq!(json["normalized_code"][1], "// ⚠ unknown operation: foo");
}

#[test]
fn run_reads_stdin() {
    codescape()
        .args(["run", "-"])
        .write_stdin("build_fountain(0, 0)\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("line 1: ok: fountain at (0, 0)"));
}

#[test]
fn run_with_mask_and_map() {
    let dir = TempDir::new().unwrap();
    let mask = write(&dir, "island.txt", "~~~\n~#~\n~~~\n");
    let script = write(&dir, "city.py", "build_pool(0, 0)\n");
    codescape()
        .args(["run", "--map", "--mask"])
        .arg(&mask)
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("line 1: ok: pool at (1, 1)"))
        .stdout(predicate::str::contains("~~~\n~W~\n~~~"));
}

#[test]
fn run_uses_config_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, "land.json", "[[true, true], [true, true]]");
    let config = write(
        &dir,
        "codescape.toml",
        "[grid]\nmask = \"land.json\"\n\n[placement]\ndefault_center = [1, 0]\n",
    );
    let script = write(&dir, "city.py", "build_shop()\n");
    codescape()
        .arg("--config")
        .arg(&config)
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("line 1: ok: shop at (1, 0)"));
}

#[test]
fn run_radius_flag_limits_search() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "city.py", "build_shop(0, 0)\nbuild_shop(0, 0)\n");
    codescape()
        .args(["run", "--radius", "0"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "line 2: error: no free tile for shop within 0 tiles of (0, 0)",
        ))
        .stderr(predicate::str::contains("WARN").not());
}

#[test]
fn run_missing_script_exits_1() {
    codescape()
        .args(["run", "/nonexistent/city.py"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not read '/nonexistent/city.py'"));
}

#[test]
fn run_bad_mask_exits_1() {
    let dir = TempDir::new().unwrap();
    let mask = write(&dir, "bad.txt", "##\n#\n");
    let script = write(&dir, "city.py", "build_park()\n");
    codescape()
        .args(["--output", "json", "run", "--mask"])
        .arg(&mask)
        .arg(&script)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("\"error\""))
        .stderr(predicate::str::contains("mask row 1 has 1 cells, expected 2"));
}

// ──────────────────────────────────────────────
// 3. check and ops
// ──────────────────────────────────────────────

#[test]
fn check_prints_normalized_code() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "city.py", "# north side\nbuild_apartment(2, 3, name='Tower')\n");
    codescape()
        .arg("check")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("// north side"))
        .stdout(predicate::str::contains(
            "build_apartment(row=2, col=3, floors=4, name=\"Tower\")",
        ));
}

#[test]
fn check_exits_1_on_diagnostics() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "city.py", "build_house 1 2\n");
    codescape()
        .arg("check")
        .arg(&script)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("// ⚠ cannot parse: build_house 1 2"))
        .stderr(predicate::str::contains("warning: line 1: cannot parse line"));
}

#[test]
fn ops_lists_catalog() {
    codescape()
        .arg("ops")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "build_house(row=None, col=None, floors=1, name=\"\")",
        ))
        .stdout(predicate::str::contains("build_road(row=20, col=20, direction=\"h\")"))
        .stdout(predicate::str::contains("clear_all()"));
}

#[test]
fn ops_json() {
    let out = codescape().args(["--output", "json", "ops"]).output().unwrap();
    assert!(out.status.success());
    let ops: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let ops = ops.as_array().unwrap();
    assert_eq!(ops.len(), 12);
    let apartment = ops.iter().find(|o| o["name"] == "build_apartment").unwrap();
    assert_eq!(apartment["parameters"][2]["default"], 4);
}
