// Tests for src/cli/args.rs — argument parsing and config resolution.
//
// Verifies:
//   - NUM_LINES is required and must be an integer >= 2
//   - optional flags parse into the expected fields
//   - relative --compiler / --output resolve against --base-dir
//   - defaults reproduce the classic <base>/../startasm + <base>/StressTest.sasm layout
//   - --keep conflicts with --generate-only

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::error::ErrorKind;
use sasm_stress::cli::args::parse_args_from;

fn parse(args: &[&str]) -> Result<sasm_stress::cli::args::Cli, clap::Error> {
    let mut argv = vec!["sasm-stress"];
    argv.extend_from_slice(args);
    parse_args_from(argv)
}

#[test]
fn num_lines_only() {
    let cli = parse(&["500"]).unwrap();
    assert_eq!(cli.num_lines, 500);
    assert!(cli.base_dir.is_none());
    assert!(cli.compiler.is_none());
    assert!(cli.output.is_none());
    assert!(cli.seed.is_none());
    assert!(cli.timeout.is_none());
    assert!(!cli.generate_only);
    assert!(!cli.keep);
    assert_eq!(cli.display_level(), 2);
}

#[test]
fn num_lines_is_required() {
    let err = parse(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn num_lines_below_two_is_usage_error() {
    for bad in ["0", "1"] {
        let err = parse(&[bad]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation, "{}", bad);
    }
    assert!(parse(&["ten"]).is_err());
    assert!(parse(&["--", "-3"]).is_err());
}

#[test]
fn all_flags() {
    let cli = parse(&[
        "1000",
        "--base-dir",
        "/srv/bench",
        "--compiler",
        "bin/startasm",
        "-o",
        "out.sasm",
        "--seed",
        "42",
        "--timeout",
        "2.5",
        "--keep",
        "-vv",
    ])
    .unwrap();
    assert_eq!(cli.num_lines, 1000);
    assert_eq!(cli.base_dir.as_deref(), Some(Path::new("/srv/bench")));
    assert_eq!(cli.seed, Some(42));
    assert_eq!(cli.timeout, Some(Duration::from_millis(2500)));
    assert!(cli.keep);
    assert_eq!(cli.display_level(), 4);

    let config = cli.to_config().unwrap();
    assert_eq!(config.base_dir, PathBuf::from("/srv/bench"));
    assert_eq!(config.compiler, PathBuf::from("/srv/bench/bin/startasm"));
    assert_eq!(config.scratch_path, PathBuf::from("/srv/bench/out.sasm"));
    assert_eq!(config.seed, Some(42));
    assert!(config.keep_scratch);
}

#[test]
fn absolute_paths_are_not_rebased() {
    let cli = parse(&[
        "3",
        "--base-dir",
        "/srv/bench",
        "--compiler",
        "/usr/local/bin/startasm",
        "--output",
        "/tmp/x.sasm",
    ])
    .unwrap();
    let config = cli.to_config().unwrap();
    assert_eq!(config.compiler, PathBuf::from("/usr/local/bin/startasm"));
    assert_eq!(config.scratch_path, PathBuf::from("/tmp/x.sasm"));
}

#[test]
fn defaults_follow_base_dir() {
    let config = parse(&["3", "--base-dir", "/srv/bench/testing"])
        .unwrap()
        .to_config()
        .unwrap();
    assert_eq!(config.compiler, PathBuf::from("/srv/bench/testing/../startasm"));
    assert_eq!(
        config.scratch_path,
        PathBuf::from("/srv/bench/testing/StressTest.sasm")
    );
}

#[test]
fn relative_base_dir_becomes_absolute() {
    let config = parse(&["3", "--base-dir", "rel/dir"])
        .unwrap()
        .to_config()
        .unwrap();
    assert!(config.base_dir.is_absolute());
    assert!(config.base_dir.ends_with("rel/dir"));
}

#[test]
fn default_base_dir_is_executable_dir() {
    let config = parse(&["3"]).unwrap().to_config().unwrap();
    let exe_dir = std::env::current_exe().unwrap();
    assert_eq!(Some(config.base_dir.as_path()), exe_dir.parent());
}

#[test]
fn keep_conflicts_with_generate_only() {
    let err = parse(&["10", "--keep", "--generate-only"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn quiet_lowers_display_level() {
    assert_eq!(parse(&["10", "-q"]).unwrap().display_level(), 1);
    assert_eq!(parse(&["10", "-qq"]).unwrap().display_level(), 0);
}

#[test]
fn bad_timeout_is_rejected() {
    assert!(parse(&["10", "--timeout", "0"]).is_err());
    assert!(parse(&["10", "--timeout", "soon"]).is_err());
}
