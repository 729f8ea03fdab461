// Integration tests for src/harness.rs — one full run, end to end.
//
// Scenarios:
//   - successful run: output captured, scratch file deleted
//   - missing compiler: launch error reported, scratch file still deleted
//   - unwritable corpus location: fatal before any launch, nothing lingers
//   - failing compiler: stdout relayed unmodified, cleanup still attempted
//   - --keep and generate-only leave the corpus on disk
#![cfg(unix)]

mod support;

use std::fs;

use sasm_stress::config::DEFAULT_SCRATCH_NAME;
use sasm_stress::error::HarnessError;
use sasm_stress::harness::{self, HarnessConfig};
use sasm_stress::scratch::CleanupOutcome;
use tempfile::TempDir;

#[test]
fn default_layout_is_anchored_on_base_dir() {
    let config = HarnessConfig::new(10, "/opt/bench/testing");
    assert_eq!(
        config.compiler,
        std::path::Path::new("/opt/bench/testing/../startasm")
    );
    assert_eq!(
        config.scratch_path,
        std::path::Path::new("/opt/bench/testing").join(DEFAULT_SCRATCH_NAME)
    );
    assert!(config.seed.is_none());
    assert!(config.timeout.is_none());
    assert!(!config.keep_scratch);
}

#[test]
fn successful_run_captures_output_and_cleans_up() {
    let dir = TempDir::new().unwrap();
    let exe = support::echo_compiler(dir.path());
    let config = HarnessConfig::new(25, dir.path())
        .with_compiler(&exe)
        .with_seed(Some(3));

    let report = harness::run(&config).unwrap();
    assert_eq!(report.line_count, 25);
    assert_eq!(report.seed, 3);
    assert_eq!(report.corpus_path, dir.path().join(DEFAULT_SCRATCH_NAME));

    let output = report.result.unwrap();
    assert!(output.stdout.contains("sub=compile flag=--timings"));
    assert!(output.stdout.contains(support::HEADER));
    assert!(matches!(report.cleanup, Some(CleanupOutcome::Deleted)));
    assert!(!report.corpus_path.exists());
}

#[test]
fn compiler_sees_a_complete_corpus() {
    let dir = TempDir::new().unwrap();
    let exe = support::fake_compiler(dir.path(), "startasm", "cat \"$2\"");
    let config = HarnessConfig::new(12, dir.path())
        .with_compiler(&exe)
        .with_seed(Some(12));

    let output = harness::run(&config).unwrap().result.unwrap();
    let templates = support::templates();
    let lines = support::corpus_lines(&output.stdout);
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], support::HEADER);
    for line in &lines[1..11] {
        support::assert_interior_line(&templates, line);
    }
    assert_eq!(lines[11], "stop");
}

#[test]
fn missing_compiler_reports_launch_error_and_cleans_up() {
    let dir = TempDir::new().unwrap();
    let config = HarnessConfig::new(5, dir.path()).with_compiler(dir.path().join("nope"));

    let report = harness::run(&config).unwrap();
    let err = report.result.unwrap_err();
    assert!(matches!(err, HarnessError::Launch { .. }));
    assert!(err.to_string().starts_with("launch error"));
    assert!(err.to_string().contains("nope"));
    assert!(matches!(report.cleanup, Some(CleanupOutcome::Deleted)));
    assert!(!report.corpus_path.exists());
}

#[test]
fn unwritable_corpus_location_is_fatal_before_launch() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("launched");
    let exe = support::fake_compiler(
        dir.path(),
        "startasm",
        &format!("touch '{}'", marker.display()),
    );
    let scratch = dir.path().join("missing-dir").join("StressTest.sasm");
    let config = HarnessConfig::new(5, dir.path())
        .with_compiler(&exe)
        .with_scratch_path(&scratch);

    let err = harness::run(&config).unwrap_err();
    assert_eq!(err.category(), "corpus-write");
    assert_eq!(err.exit_code(), 1);
    assert!(!marker.exists(), "compiler must not be launched");
    assert!(!scratch.exists());
}

#[test]
fn failing_compiler_output_is_relayed_and_cleanup_attempted() {
    let dir = TempDir::new().unwrap();
    let exe = support::fake_compiler(
        dir.path(),
        "startasm",
        "printf 'Lexing: 1ms\\nParse error on line 3\\n'\nexit 1",
    );
    let config = HarnessConfig::new(8, dir.path()).with_compiler(&exe);

    let report = harness::run(&config).unwrap();
    let output = report.result.unwrap();
    assert_eq!(output.code(), Some(1));
    assert_eq!(output.stdout, "Lexing: 1ms\nParse error on line 3\n");
    assert!(report.cleanup.unwrap().is_deleted());
}

#[test]
fn compiler_deleting_the_corpus_yields_not_found() {
    let dir = TempDir::new().unwrap();
    let exe = support::fake_compiler(dir.path(), "startasm", "rm -f \"$2\"\necho done");
    let config = HarnessConfig::new(4, dir.path()).with_compiler(&exe);

    let report = harness::run(&config).unwrap();
    assert_eq!(report.result.unwrap().stdout, "done\n");
    let cleanup = report.cleanup.unwrap();
    assert!(matches!(cleanup, CleanupOutcome::NotFound));
    assert!(cleanup
        .warning(&report.corpus_path)
        .unwrap()
        .contains("file not found"));
}

#[test]
fn keep_scratch_skips_cleanup() {
    let dir = TempDir::new().unwrap();
    let exe = support::echo_compiler(dir.path());
    let config = HarnessConfig::new(6, dir.path())
        .with_compiler(&exe)
        .with_keep_scratch(true);

    let report = harness::run(&config).unwrap();
    assert!(report.cleanup.is_none());
    assert!(report.corpus_path.is_file());
}

#[test]
fn generate_leaves_reproducible_corpus() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.sasm");
    let b = dir.path().join("b.sasm");

    let ga = harness::generate(
        &HarnessConfig::new(100, dir.path())
            .with_scratch_path(&a)
            .with_seed(Some(77)),
    )
    .unwrap();
    let gb = harness::generate(
        &HarnessConfig::new(100, dir.path())
            .with_scratch_path(&b)
            .with_seed(Some(77)),
    )
    .unwrap();

    assert_eq!(ga.line_count, 100);
    assert_eq!(ga.path, a);
    assert_eq!(gb.seed, 77);
    assert_eq!(fs::read_to_string(&a).unwrap(), fs::read_to_string(&b).unwrap());
}

#[test]
fn too_small_request_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let config = HarnessConfig::new(1, dir.path());
    let err = harness::run(&config).unwrap_err();
    assert!(matches!(err, HarnessError::InvalidLineCount { requested: 1 }));
    assert_eq!(err.exit_code(), 2);
    assert!(!config.scratch_path.exists());
}
