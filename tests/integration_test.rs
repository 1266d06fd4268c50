// tests/integration_test.rs
use std::fs;
use std::process::Command;

use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_wt-package");

fn project(manifest: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Cargo.toml"), manifest).unwrap();
    dir
}

#[test]
fn test_help() {
    let output = Command::new(BIN)
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("wt-package"));
    assert!(stdout.contains("[PLATFORM]"));
    assert!(stdout.contains("--no-cleanup"));
}

#[test]
fn test_version() {
    let output = Command::new(BIN)
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unsupported_platform_exit_code() {
    let dir = project("[package]\nname = \"wt\"\nversion = \"0.0.1\"\n");

    let output = Command::new(BIN)
        .arg("WINDOWS")
        .arg("--no-cleanup")
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Platform not supported: WINDOWS"),
        "unexpected stderr: {}",
        stderr
    );
    assert!(!dir.path().join("target").exists());
}

#[test]
fn test_missing_version_exit_code() {
    let dir = project("[package]\nname = \"wt\"\n");

    let output = Command::new(BIN)
        .arg("linux")
        .arg("--no-cleanup")
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not declare a version"));
    assert!(!dir.path().join("target").exists());
}

#[test]
fn test_cleanup_flags_conflict() {
    let output = Command::new(BIN)
        .args(["linux", "--yes", "--no-cleanup"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot be used with"));
}

#[test]
fn test_positional_platform_alone_is_accepted() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(BIN)
        .arg("LINUX")
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute command");

    // no manifest in the empty dir: argument parsing passed, config stage failed
    assert_eq!(output.status.code(), Some(2));
}
