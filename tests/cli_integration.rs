//! CLI integration tests
//!
//! Only paths that fail before any model request are exercised here, so no
//! model server is needed.

use std::process::Command;
use tempfile::TempDir;

fn readmegen() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_readmegen"));
    cmd.env("READMEGEN_LOG_LEVEL", "error");
    cmd
}

#[test]
fn test_cli_help() {
    let output = readmegen().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--path"));
    assert!(stdout.contains("--repo"));
    assert!(stdout.contains("--max-files"));
}

#[test]
fn test_cli_version() {
    let output = readmegen().arg("--version").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_source_exits_with_usage() {
    let output = readmegen().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_conflicting_sources_exit_with_usage() {
    let output = readmegen()
        .args(["--path", ".", "--repo", "octo/widgets"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_repo_spec_exits_with_usage() {
    let output = readmegen().args(["--repo", "widgets"]).output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid repository spec 'widgets'"));
}

#[test]
fn test_missing_path_exits_with_usage() {
    let dir = TempDir::new().unwrap();
    let output = readmegen()
        .args(["--path"])
        .arg(dir.path().join("absent"))
        .arg("--out")
        .arg(dir.path().join("README.md"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(!dir.path().join("README.md").exists());
}

#[test]
fn test_missing_template_is_fatal() {
    let dir = TempDir::new().unwrap();
    let output = readmegen()
        .arg("--path")
        .arg(dir.path())
        .arg("--template")
        .arg(dir.path().join("nope.hbs"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("template not found").count(), 1);
}
