// e2e/error_handling.rs — fatal and non-fatal error paths of the binary
//
// Each category must be reported with its name and the offending path:
//   usage          → exit 2, no file created
//   corpus-write   → exit 1, compiler never launched
//   launch         → exit 1, scratch file still removed
//   timeout        → exit 1, scratch file still removed
//   cleanup        → warning only, exit 0
#![cfg(unix)]

#[path = "../tests/support/mod.rs"]
mod support;

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{Duration, Instant};

use tempfile::TempDir;

fn harness_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sasm-stress"))
}

fn harness(dir: &TempDir) -> Command {
    let mut cmd = Command::new(harness_bin());
    cmd.arg("--base-dir").arg(dir.path());
    cmd
}

#[test]
fn usage_error_for_tiny_corpus() {
    let dir = TempDir::new().unwrap();
    for n in ["0", "1"] {
        let output = harness(&dir).arg(n).output().unwrap();
        assert_eq!(output.status.code(), Some(2), "n = {}", n);
    }
    let output = harness(&dir).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none(), "no file may be created");
}

#[test]
fn usage_error_for_non_integer() {
    let dir = TempDir::new().unwrap();
    let output = harness(&dir).arg("many").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("many"));
}

#[test]
fn corpus_write_error_aborts_before_launch() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("launched");
    let exe = support::fake_compiler(
        dir.path(),
        "startasm",
        &format!("touch '{}'", marker.display()),
    );

    let output = harness(&dir)
        .args([
            "--compiler",
            exe.to_str().unwrap(),
            "-o",
            "no/such/dir/StressTest.sasm",
            "10",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("corpus write error"), "{}", stderr);
    assert!(stderr.contains("no/such/dir/StressTest.sasm"));
    assert!(!stderr.contains("Starting benchmark"));
    assert!(!marker.exists());
    assert!(output.stdout.is_empty());
}

#[test]
fn launch_error_is_fatal_and_cleans_up() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("startasm-missing");

    let output = harness(&dir)
        .args(["--compiler", missing.to_str().unwrap(), "10"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("launch error"), "{}", stderr);
    assert!(stderr.contains("startasm-missing"));
    assert!(!dir.path().join("StressTest.sasm").exists());
}

#[test]
fn timeout_is_fatal_and_cleans_up() {
    let dir = TempDir::new().unwrap();
    let exe = support::fake_compiler(dir.path(), "startasm", "exec sleep 30");

    let start = Instant::now();
    let output = harness(&dir)
        .args(["--compiler", exe.to_str().unwrap(), "--timeout", "0.3", "10"])
        .output()
        .unwrap();
    assert!(start.elapsed() < Duration::from_secs(15));
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("timeout"));
    assert!(!dir.path().join("StressTest.sasm").exists());
}

#[test]
fn cleanup_failure_is_only_a_warning() {
    let dir = TempDir::new().unwrap();
    // The compiler removes the corpus itself, so the harness finds nothing to delete.
    let exe = support::fake_compiler(dir.path(), "startasm", "rm -f \"$2\"\necho compiled");

    let output = harness(&dir)
        .args(["--compiler", exe.to_str().unwrap(), "10"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "compiled\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("file not found deleting stress test file"), "{}", stderr);
    assert!(stderr.contains("StressTest.sasm"));
}
