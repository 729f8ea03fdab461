// e2e/cli_integration.rs — CLI integration tests
//
// Tests the `sasm-stress` binary as a black-box CLI tool using
// std::process::Command, with a shell-script stand-in for the compiler.
// Covers argument handling, the run/relay/cleanup sequence, generate-only
// mode and exit codes.
#![cfg(unix)]

#[path = "../tests/support/mod.rs"]
mod support;

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Path to the compiled `sasm-stress` binary under test.
fn harness_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sasm-stress"))
}

fn harness(dir: &TempDir) -> Command {
    let mut cmd = Command::new(harness_bin());
    cmd.arg("--base-dir").arg(dir.path());
    cmd
}

// ── 1. Full run ──────────────────────────────────────────────────────────────

#[test]
fn test_cli_run_relays_compiler_stdout() {
    let dir = TempDir::new().unwrap();
    let exe = support::echo_compiler(dir.path());

    let output = harness(&dir)
        .args(["--compiler", exe.to_str().unwrap(), "50"])
        .output()
        .expect("failed to run sasm-stress");
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("argc=3 sub=compile flag=--timings"), "{}", stdout);
    assert!(stdout.contains("timings: lexing 0.001s parsing 0.002s"));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Preparing test unit"));
    assert!(stderr.contains("Starting benchmark"));

    assert!(!dir.path().join("StressTest.sasm").exists(), "scratch file must be removed");
}

#[test]
fn test_cli_default_compiler_location() {
    // <base>/../startasm
    let root = TempDir::new().unwrap();
    let base = root.path().join("testing");
    fs::create_dir(&base).unwrap();
    support::echo_compiler(root.path());

    let output = Command::new(harness_bin())
        .arg("--base-dir")
        .arg(&base)
        .arg("10")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("sub=compile"));
    assert!(!base.join("StressTest.sasm").exists());
}

#[test]
fn test_cli_relative_compiler_resolves_against_base_dir() {
    let dir = TempDir::new().unwrap();
    support::echo_compiler(dir.path());
    let elsewhere = TempDir::new().unwrap();

    let output = harness(&dir)
        .args(["--compiler", "startasm", "5"])
        .current_dir(elsewhere.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("sub=compile"));
}

// ── 2. Compiler failure ──────────────────────────────────────────────────────

#[test]
fn test_cli_compiler_failure_still_exits_zero() {
    let dir = TempDir::new().unwrap();
    let exe = support::fake_compiler(
        dir.path(),
        "startasm",
        "printf 'Parse error: unexpected token\\n'\nexit 4",
    );

    let output = harness(&dir)
        .args(["--compiler", exe.to_str().unwrap(), "20"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Parse error: unexpected token\n"
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("compiler exited with"));
    assert!(!dir.path().join("StressTest.sasm").exists());
}

// ── 3. Generate-only / keep ──────────────────────────────────────────────────

#[test]
fn test_cli_generate_only_writes_and_keeps_corpus() {
    let dir = TempDir::new().unwrap();
    let output = harness(&dir)
        .args(["--generate-only", "--seed", "5", "30"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Generated sample stress test at 30 lines of code."));

    let text = fs::read_to_string(dir.path().join("StressTest.sasm")).unwrap();
    let lines = support::corpus_lines(&text);
    assert_eq!(lines.len(), 30);
    assert_eq!(lines[0], support::HEADER);
    assert_eq!(lines[29], "stop");
}

#[test]
fn test_cli_seed_is_reproducible() {
    let dir = TempDir::new().unwrap();
    for name in ["a.sasm", "b.sasm"] {
        let status = harness(&dir)
            .args(["--generate-only", "--seed", "2024", "-o", name, "200"])
            .status()
            .unwrap();
        assert!(status.success());
    }
    assert_eq!(
        fs::read(dir.path().join("a.sasm")).unwrap(),
        fs::read(dir.path().join("b.sasm")).unwrap()
    );
}

#[test]
fn test_cli_keep_leaves_scratch_file() {
    let dir = TempDir::new().unwrap();
    let exe = support::echo_compiler(dir.path());
    let status = harness(&dir)
        .args(["--keep", "--compiler", exe.to_str().unwrap(), "-q", "7"])
        .status()
        .unwrap();
    assert!(status.success());
    let text = fs::read_to_string(dir.path().join("StressTest.sasm")).unwrap();
    assert_eq!(text.split('\n').count(), 7);
}

// ── 4. Help / version / quiet ────────────────────────────────────────────────

#[test]
fn test_cli_help_and_version() {
    let help = Command::new(harness_bin()).arg("--help").output().unwrap();
    assert!(help.status.success());
    assert!(String::from_utf8_lossy(&help.stdout).contains("NUM_LINES"));

    let version = Command::new(harness_bin()).arg("--version").output().unwrap();
    assert!(version.status.success());
    assert!(String::from_utf8_lossy(&version.stdout).contains("sasm-stress"));
}

#[test]
fn test_cli_quiet_suppresses_progress_but_not_output() {
    let dir = TempDir::new().unwrap();
    let exe = support::echo_compiler(dir.path());
    let output = harness(&dir)
        .args(["-q", "--compiler", exe.to_str().unwrap(), "4"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Preparing test unit"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("sub=compile"));
}

#[test]
fn test_cli_verbose_progress_lines_are_clean() {
    let dir = TempDir::new().unwrap();
    let exe = support::echo_compiler(dir.path());

    let output = harness(&dir)
        .args(["-vv", "--keep", "--seed", "5", "--compiler", exe.to_str().unwrap(), "12"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Synthesizing 12 lines (seed 5)\n"), "{}", stderr);
    assert!(stderr.contains("Compiler : "), "{}", stderr);
    assert!(stderr.contains("Arguments : compile "), "{}", stderr);
    assert!(stderr.contains("Keeping stress test file "), "{}", stderr);
    for line in stderr.lines() {
        assert_eq!(line, line.trim_end(), "trailing whitespace in {:?}", line);
    }
}
